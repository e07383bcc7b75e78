// Install command: download, verify and extract a release

use crate::archive;
use crate::commands::installer_for;
use crate::config;
use crate::constants::INSTALL_MARKER_FILE;
use crate::http;
use crate::installer::Installer;
use crate::release::catalog::ReleaseCatalog;
use crate::ui;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub async fn install(
    catalog: &ReleaseCatalog,
    major_version: u32,
    os: Option<String>,
    arch: Option<String>,
    if_not_exists: bool,
) -> Result<()> {
    let installer = installer_for(os, arch)?;
    let resolved = installer.resolve(catalog, major_version)?;

    let install_dir = config::install_dir();
    let dest = Path::new(&install_dir).join(&resolved.tag);
    let marker = dest.join(INSTALL_MARKER_FILE);

    if if_not_exists && marker.exists() {
        ui::success(&format!(
            "{} already installed in {}",
            resolved.tag,
            dest.display()
        ));
        return Ok(());
    }

    fs::create_dir_all(&install_dir)
        .with_context(|| format!("Failed to create directory: {}", install_dir))?;

    let url = installer.url_for_tag(&resolved.tag);
    let archive_path = Path::new(&install_dir).join(format!("{}.partial.tar.gz", resolved.tag));

    ui::action(&format!("Downloading {}", url));
    let bar = ui::download_bar();
    let download = http::download_to_file(&url, &archive_path, &bar).await;
    ui::clear_bar(&bar);
    download?;

    let expected = fetch_expected_checksum(&installer, &resolved.tag).await?;
    let actual = sha256_file(&archive_path)?;
    if actual != expected {
        let _ = fs::remove_file(&archive_path);
        anyhow::bail!(
            "Checksum mismatch for {}: expected sha256:{}, got sha256:{}",
            resolved.tag,
            expected,
            actual
        );
    }
    ui::action(&format!("Verified sha256:{}", actual));

    ui::action(&format!("Extracting to {}", dest.display()));
    archive::extract_tar_gz(&archive_path, &dest)?;
    fs::remove_file(&archive_path)
        .with_context(|| format!("Failed to remove {}", archive_path.display()))?;

    // A racing peer may create or remove the marker concurrently; the write
    // is last-wins and an existing marker is not an error.
    fs::write(&marker, format!("{}\n", resolved.tag))
        .with_context(|| format!("Failed to write {}", marker.display()))?;

    ui::success(&format!(
        "Installed {} into {}",
        resolved.tag,
        dest.display()
    ));
    Ok(())
}

/// Fetches the `.sha256` companion and extracts the hex digest. The
/// companion format is `<digest>  <file name>`.
async fn fetch_expected_checksum(installer: &Installer, tag: &str) -> Result<String> {
    let url = installer.checksum_url_for_tag(tag);
    let text = http::fetch_text(&url).await?;
    text.split_whitespace()
        .next()
        .map(|digest| digest.to_lowercase())
        .ok_or_else(|| anyhow::anyhow!("Checksum file at {} is empty", url))
}

fn sha256_file(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data");
        fs::write(&path, b"hello world").unwrap();
        let digest = sha256_file(&path).unwrap();
        assert_eq!(
            digest,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
