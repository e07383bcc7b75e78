// Release catalog backed by the embedded tag dataset

use crate::error::ResolveError;
use crate::release::compat;
use crate::release::tag::ParsedTag;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// The dataset shipped with the binary, regenerated by `update-tags`.
const EMBEDDED_DATASET: &str = include_str!("release_tags.json");

/// On-disk shape of the release dataset.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagDataset {
    pub tags: Vec<ParsedTag>,
}

/// An ordered, immutable collection of parsed release tags.
///
/// Filtering produces a new catalog and never mutates the source. The
/// catalog is constructed once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct ReleaseCatalog {
    tags: Vec<ParsedTag>,
}

impl ReleaseCatalog {
    pub fn from_tags(tags: Vec<ParsedTag>) -> Self {
        Self { tags }
    }

    /// Parses a sequence of raw tag strings into a catalog. Any unparseable
    /// tag fails the whole call.
    pub fn parse_all<'a, I>(raw_tags: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags = raw_tags
            .into_iter()
            .map(ParsedTag::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_tags(tags))
    }

    /// Loads the embedded dataset. The dataset is validated entry by entry:
    /// each record's tag is re-parsed and compared field for field, so a
    /// record that disagrees with its own tag is fatal here rather than a
    /// wrong pick later.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_dataset_str(EMBEDDED_DATASET).context("embedded release dataset is malformed")
    }

    fn from_dataset_str(data: &str) -> anyhow::Result<Self> {
        let dataset: TagDataset = serde_json::from_str(data)?;
        for record in &dataset.tags {
            let parsed = ParsedTag::parse(&record.tag)?;
            if &parsed != record {
                bail!(
                    "dataset record for tag '{}' disagrees with its parsed form",
                    record.tag
                );
            }
        }
        Ok(Self::from_tags(dataset.tags))
    }

    /// Pure projection onto the entries matching the requested major version,
    /// a compatible OS, and the exact architecture string. Source order is
    /// preserved.
    pub fn filter(
        &self,
        major_version: u32,
        requested_os: &str,
        requested_arch: &str,
    ) -> ReleaseCatalog {
        Self::from_tags(
            self.tags
                .iter()
                .filter(|tag| {
                    tag.major_version == major_version
                        && compat::is_compatible_os(&tag.os_name_and_version, requested_os)
                        && tag.architecture == requested_arch
                })
                .cloned()
                .collect(),
        )
    }

    pub fn tags(&self) -> &[ParsedTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Deterministic one-entry-per-line rendering for diagnostics.
    pub fn one_per_line(&self, indent: usize) -> String {
        let indent_str = " ".repeat(indent);
        self.tags
            .iter()
            .map(|tag| format!("{indent_str}{tag}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> ReleaseCatalog {
        ReleaseCatalog::parse_all([
            "v11.1.0-1633099975-130bd22e",
            "v14.0.0-1648363631-a9d38bc9-centos7-x86_64",
            "v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64",
            "v14.0.3-1651732108-1f914006-almalinux8-aarch64",
            "v15.0.7-1672862029-23e51f2c-ubuntu22.04-x86_64",
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_dataset_loads() {
        let catalog = ReleaseCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(
            catalog
                .tags()
                .iter()
                .any(|tag| tag.tag == "v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64")
        );
    }

    #[test]
    fn test_filter_matches_major_os_and_arch() {
        let filtered = sample_catalog().filter(14, "ubuntu22.04", "x86_64");
        assert_eq!(filtered.tags().len(), 1);
        assert_eq!(
            filtered.tags()[0].tag,
            "v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64"
        );
    }

    #[test]
    fn test_filter_never_mixes_architectures() {
        let filtered = sample_catalog().filter(14, "almalinux8", "x86_64");
        // The catalog only has an aarch64 build for almalinux8; exact
        // architecture matching must not fall back to it.
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_uses_os_compatibility() {
        // A rocky8.6 host is served by the almalinux8 build.
        let filtered = sample_catalog().filter(14, "rocky8.6", "aarch64");
        assert_eq!(filtered.tags().len(), 1);
        assert_eq!(filtered.tags()[0].os_name_and_version, "almalinux8");
    }

    #[test]
    fn test_filter_includes_legacy_defaults() {
        let filtered = sample_catalog().filter(11, "centos7", "x86_64");
        assert_eq!(filtered.tags().len(), 1);
        assert!(filtered.tags()[0].is_legacy_format);
    }

    #[test]
    fn test_filter_preserves_order_and_source() {
        let catalog = sample_catalog();
        let before: Vec<String> = catalog.tags().iter().map(|t| t.tag.clone()).collect();
        let filtered = catalog.filter(14, "ubuntu22.04", "x86_64");
        // Source untouched, projection ordered as the source was.
        let after: Vec<String> = catalog.tags().iter().map(|t| t.tag.clone()).collect();
        assert_eq!(before, after);
        assert!(filtered.tags().len() <= catalog.tags().len());
    }

    #[test]
    fn test_one_per_line_is_deterministic() {
        let catalog = sample_catalog();
        let first = catalog.one_per_line(4);
        assert_eq!(first, catalog.one_per_line(4));
        assert_eq!(first.lines().count(), catalog.tags().len());
        assert!(first.lines().all(|line| line.starts_with("    ")));
    }
}
