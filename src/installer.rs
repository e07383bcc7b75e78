// Resolves release tags to download URLs for one target platform

use crate::config;
use crate::constants::CHECKSUM_URL_SUFFIX;
use crate::error::ResolveError;
use crate::release::catalog::ReleaseCatalog;
use crate::release::selector::{self, SelectionCriteria};
use crate::release::tag::ParsedTag;

/// Combines a target platform with the release naming conventions to turn a
/// catalog lookup into a concrete artifact URL.
#[derive(Debug, Clone)]
pub struct Installer {
    os_name_and_version: String,
    architecture: String,
    release_url_prefix: String,
    package_name_prefix: String,
    package_name_suffix: String,
}

impl Installer {
    /// Installer for the given platform using the configured naming
    /// (environment overrides or built-in defaults).
    pub fn new(os_name_and_version: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self::with_naming(
            os_name_and_version,
            architecture,
            config::release_url_prefix(),
            config::package_name_prefix(),
            config::package_name_suffix(),
        )
    }

    pub fn with_naming(
        os_name_and_version: impl Into<String>,
        architecture: impl Into<String>,
        release_url_prefix: impl Into<String>,
        package_name_prefix: impl Into<String>,
        package_name_suffix: impl Into<String>,
    ) -> Self {
        let release_url_prefix = release_url_prefix.into();
        Self {
            os_name_and_version: os_name_and_version.into(),
            architecture: architecture.into(),
            release_url_prefix: release_url_prefix.trim_end_matches('/').to_string(),
            package_name_prefix: package_name_prefix.into(),
            package_name_suffix: package_name_suffix.into(),
        }
    }

    pub fn os_name_and_version(&self) -> &str {
        &self.os_name_and_version
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Artifact URL for a tag:
    /// `{prefix}/{tag}/{name_prefix}{tag}{name_suffix}`.
    pub fn url_for_tag(&self, tag: &str) -> String {
        format!(
            "{}/{}/{}{}{}",
            self.release_url_prefix, tag, self.package_name_prefix, tag, self.package_name_suffix
        )
    }

    /// URL of the sha256 checksum companion published next to the artifact.
    pub fn checksum_url_for_tag(&self, tag: &str) -> String {
        format!("{}{}", self.url_for_tag(tag), CHECKSUM_URL_SUFFIX)
    }

    fn criteria(&self, major_version: u32) -> SelectionCriteria {
        SelectionCriteria {
            major_version,
            os_name_and_version: self.os_name_and_version.clone(),
            architecture: self.architecture.clone(),
        }
    }

    /// Filters the catalog for this platform and picks the best release.
    pub fn resolve(
        &self,
        catalog: &ReleaseCatalog,
        major_version: u32,
    ) -> Result<ParsedTag, ResolveError> {
        let filtered = catalog.filter(
            major_version,
            &self.os_name_and_version,
            &self.architecture,
        );
        selector::select_release(&filtered, catalog, &self.criteria(major_version)).cloned()
    }
}
