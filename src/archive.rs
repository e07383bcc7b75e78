// Archive extraction for downloaded toolchain packages

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::path::{Path, PathBuf};
use tar::Archive;

/// Extracts a tar.gz archive to the destination directory, creating it if
/// needed.
///
/// If all archive entries share a common root folder it is stripped during
/// extraction, so `clang-toolchain-v14/bin/clang` lands at `bin/clang`.
/// Entries with absolute paths or parent-directory references are rejected.
pub fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    let strip_prefix = find_common_root_folder(archive_path)?;

    let file = std::fs::File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read tar entries: {}", archive_path.display()))?
    {
        let mut entry = entry
            .with_context(|| format!("Failed to read tar entry: {}", archive_path.display()))?;

        let entry_path = entry
            .path()
            .context("Failed to get entry path")?
            .into_owned();

        if entry_path.is_absolute()
            || entry_path
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            anyhow::bail!(
                "Refusing to extract path with parent directory or absolute reference: {}",
                entry_path.display()
            );
        }

        let relative_path = if let Some(ref prefix) = strip_prefix {
            match entry_path.strip_prefix(prefix) {
                Ok(p) if p.as_os_str().is_empty() => continue,
                Ok(p) => p.to_path_buf(),
                Err(_) => entry_path.clone(),
            }
        } else {
            entry_path.clone()
        };

        let output_path = dest_dir.join(&relative_path);

        if entry.header().entry_type().is_dir() {
            std::fs::create_dir_all(&output_path).with_context(|| {
                format!("Failed to create directory: {}", output_path.display())
            })?;
        } else {
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            entry
                .unpack(&output_path)
                .with_context(|| format!("Failed to extract: {}", output_path.display()))?;
        }
    }

    Ok(())
}

/// Finds a root folder shared by every archive entry. Returns `Some` only
/// when nested entries exist, so a flat file at the archive root is not
/// mistaken for a containing folder.
fn find_common_root_folder(archive_path: &Path) -> Result<Option<PathBuf>> {
    let file = std::fs::File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;

    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);

    let mut common_root: Option<PathBuf> = None;
    let mut has_nested_entries = false;

    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read tar entries: {}", archive_path.display()))?
    {
        let entry = entry
            .with_context(|| format!("Failed to read tar entry: {}", archive_path.display()))?;

        let path = entry.path().context("Failed to get entry path")?;

        if path.components().count() > 1 {
            has_nested_entries = true;
        }

        let Some(first_component) = path.components().next() else {
            continue;
        };
        let root = PathBuf::from(first_component.as_os_str());

        match &common_root {
            None => common_root = Some(root),
            Some(existing) if existing != &root => return Ok(None),
            Some(_) => {}
        }
    }

    if has_nested_entries {
        Ok(common_root)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap().flush().unwrap();
    }

    #[test]
    fn test_extract_strips_common_root() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("toolchain.tar.gz");
        write_archive(
            &archive_path,
            &[
                ("toolchain-v1/bin/clang", "clang binary"),
                ("toolchain-v1/lib/libc.a", "library"),
            ],
        );

        let dest = dir.path().join("out");
        extract_tar_gz(&archive_path, &dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("bin/clang")).unwrap(),
            "clang binary"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("lib/libc.a")).unwrap(),
            "library"
        );
    }

    #[test]
    fn test_extract_keeps_flat_files() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("flat.tar.gz");
        write_archive(&archive_path, &[("README", "hello"), ("VERSION", "1.0")]);

        let dest = dir.path().join("out");
        extract_tar_gz(&archive_path, &dest).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("README")).unwrap(), "hello");
        assert_eq!(std::fs::read_to_string(dest.join("VERSION")).unwrap(), "1.0");
    }
}
