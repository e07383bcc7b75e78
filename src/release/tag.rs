// Release tag parsing for toolchain build artifacts

use crate::constants::{BUILD_COUNTER_PREFIX, LEGACY_ARCHITECTURE, LEGACY_OS_NAME_AND_VERSION};
use crate::error::ResolveError;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture tokens accepted in release tags. Compared literally;
/// `aarch64` and `arm64` are distinct spellings and never normalized.
pub const ARCHITECTURES: &[&str] = &["x86_64", "aarch64", "arm64"];

/// Short OS names recognized in the platform component of a tag. Each may be
/// followed by a dotted version, e.g. `ubuntu22.04` or `centos7`.
pub const SHORT_OS_NAMES: &[&str] = &[
    "almalinux",
    "alpine",
    "amzn",
    "arch",
    "centos",
    "debian",
    "fedora",
    "macos",
    "opensuse",
    "rhel",
    "rocky",
    "sles",
    "ubuntu",
];

const TAG_BODY_RE_STR: &str = concat!(
    r"v(?P<version>[0-9.]+)",
    r"(-(?P<version_suffix>[a-z0-9-]+))?",
    r"-(?P<timestamp>\d+)",
    r"-(?P<commit_prefix>[0-9a-f]+)",
);

lazy_static! {
    static ref CURRENT_TAG_RE: Regex = Regex::new(&format!(
        "^{}-(?P<os_name_and_version>(?:{})[0-9.]*)-(?P<architecture>{})$",
        TAG_BODY_RE_STR,
        SHORT_OS_NAMES.join("|"),
        ARCHITECTURES.join("|"),
    ))
    .expect("current tag grammar must compile");
    static ref LEGACY_TAG_RE: Regex =
        Regex::new(&format!("^{TAG_BODY_RE_STR}$")).expect("legacy tag grammar must compile");
}

/// Structured decomposition of a release tag such as
/// `v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64`.
///
/// Immutable once constructed. The derived integer fields are computed from
/// `version` and `version_suffix`; they are stored alongside the raw fields
/// so a dataset record round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTag {
    pub tag: String,
    pub version: String,
    pub version_suffix: Option<String>,
    pub build_timestamp: u64,
    pub commit_prefix: String,
    pub os_name_and_version: String,
    pub architecture: String,
    pub major_version: u32,
    pub minor_version: u32,
    pub patch_version: u32,
    pub build_counter: Option<u32>,
    pub is_legacy_format: bool,
}

impl ParsedTag {
    /// Parses a raw release tag against the current grammar, then against the
    /// legacy grammar (no OS/architecture components). Legacy tags are
    /// assigned the fixed centos7/x86_64 defaults.
    pub fn parse(tag: &str) -> Result<Self, ResolveError> {
        if let Some(caps) = CURRENT_TAG_RE.captures(tag) {
            return Self::from_captures(tag, &caps, false);
        }
        if let Some(caps) = LEGACY_TAG_RE.captures(tag) {
            return Self::from_captures(tag, &caps, true);
        }
        Err(ResolveError::TagParse {
            tag: tag.to_string(),
            reason: "matches neither the current nor the legacy tag grammar".to_string(),
        })
    }

    fn from_captures(tag: &str, caps: &Captures<'_>, legacy: bool) -> Result<Self, ResolveError> {
        let version = caps["version"].to_string();
        let version_suffix = caps
            .name("version_suffix")
            .map(|m| m.as_str().to_string());

        let build_timestamp =
            caps["timestamp"]
                .parse::<u64>()
                .map_err(|_| ResolveError::TagParse {
                    tag: tag.to_string(),
                    reason: format!("build timestamp '{}' is out of range", &caps["timestamp"]),
                })?;

        let (major_version, minor_version, patch_version) = split_version(tag, &version)?;
        let build_counter = parse_build_counter(tag, version_suffix.as_deref())?;

        let (os_name_and_version, architecture) = if legacy {
            (
                LEGACY_OS_NAME_AND_VERSION.to_string(),
                LEGACY_ARCHITECTURE.to_string(),
            )
        } else {
            (
                caps["os_name_and_version"].to_string(),
                caps["architecture"].to_string(),
            )
        };

        Ok(Self {
            tag: tag.to_string(),
            version,
            version_suffix,
            build_timestamp,
            commit_prefix: caps["commit_prefix"].to_string(),
            os_name_and_version,
            architecture,
            major_version,
            minor_version,
            patch_version,
            build_counter,
            is_legacy_format: legacy,
        })
    }

    /// Ordering key for best-release selection: all components compared as
    /// integers, lexicographically. A missing build counter counts as 0.
    pub fn version_key(&self) -> (u32, u32, u32, u32, u64) {
        (
            self.major_version,
            self.minor_version,
            self.patch_version,
            self.build_counter.unwrap_or(0),
            self.build_timestamp,
        )
    }

    /// Stable ordering for the persisted dataset.
    pub fn catalog_key(&self) -> (u32, &str, &str, u64, &str, &str) {
        (
            self.major_version,
            &self.os_name_and_version,
            &self.architecture,
            self.build_timestamp,
            &self.commit_prefix,
            &self.tag,
        )
    }
}

impl fmt::Display for ParsedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (version {}, os {}, arch {}, built {}, commit {}",
            self.tag,
            self.version,
            self.os_name_and_version,
            self.architecture,
            self.build_timestamp,
            self.commit_prefix
        )?;
        if let Some(counter) = self.build_counter {
            write!(f, ", build {counter}")?;
        }
        if self.is_legacy_format {
            write!(f, ", legacy tag")?;
        }
        write!(f, ")")
    }
}

/// Splits a dotted version into its first three integer components. Any
/// components beyond the third are ignored for ordering.
fn split_version(tag: &str, version: &str) -> Result<(u32, u32, u32), ResolveError> {
    let mut parts = version.split('.');
    let mut next = |name: &str| -> Result<u32, ResolveError> {
        parts
            .next()
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(|| ResolveError::TagParse {
                tag: tag.to_string(),
                reason: format!(
                    "version '{version}' needs at least three numeric components ({name} is missing or not a number)"
                ),
            })
    };
    Ok((next("major")?, next("minor")?, next("patch")?))
}

/// Extracts the build counter from a version suffix. Suffixes that do not
/// start with the counter marker leave the counter absent; a marker followed
/// by a non-numeric remainder is rejected.
fn parse_build_counter(tag: &str, suffix: Option<&str>) -> Result<Option<u32>, ResolveError> {
    let Some(suffix) = suffix else {
        return Ok(None);
    };
    let Some(digits) = suffix.strip_prefix(BUILD_COUNTER_PREFIX) else {
        return Ok(None);
    };
    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ResolveError::TagParse {
            tag: tag.to_string(),
            reason: format!("build counter suffix '{suffix}' does not end in a number"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_format() {
        let parsed = ParsedTag::parse("v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64").unwrap();
        assert_eq!(parsed.tag, "v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64");
        assert_eq!(parsed.version, "14.0.3");
        assert_eq!(parsed.version_suffix, None);
        assert_eq!(parsed.build_timestamp, 1651732108);
        assert_eq!(parsed.commit_prefix, "1f914006");
        assert_eq!(parsed.os_name_and_version, "ubuntu22.04");
        assert_eq!(parsed.architecture, "x86_64");
        assert_eq!(
            (parsed.major_version, parsed.minor_version, parsed.patch_version),
            (14, 0, 3)
        );
        assert_eq!(parsed.build_counter, None);
        assert!(!parsed.is_legacy_format);
    }

    #[test]
    fn test_parse_legacy_defaults() {
        let parsed = ParsedTag::parse("v11.1.0-1633099975-130bd22e").unwrap();
        assert_eq!(parsed.os_name_and_version, "centos7");
        assert_eq!(parsed.architecture, "x86_64");
        assert!(parsed.is_legacy_format);
        assert_eq!(parsed.version, "11.1.0");
        assert_eq!(parsed.build_timestamp, 1633099975);
        assert_eq!(parsed.commit_prefix, "130bd22e");
    }

    #[test]
    fn test_parse_build_counter() {
        let parsed =
            ParsedTag::parse("v16.0.6-build-2-1708929242-b5e2c76f-almalinux8-x86_64").unwrap();
        assert_eq!(parsed.version_suffix.as_deref(), Some("build-2"));
        assert_eq!(parsed.build_counter, Some(2));
        assert_eq!(parsed.version_key(), (16, 0, 6, 2, 1708929242));
    }

    #[test]
    fn test_parse_non_counter_suffix_is_inert() {
        let parsed = ParsedTag::parse("v12.0.1-rc1-1639976983-4bc204d8-centos7-x86_64").unwrap();
        assert_eq!(parsed.version_suffix.as_deref(), Some("rc1"));
        assert_eq!(parsed.build_counter, None);
        assert_eq!(parsed.version_key().3, 0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = ParsedTag::parse("not-a-valid-tag").unwrap_err();
        assert!(matches!(err, ResolveError::TagParse { .. }));
        assert!(err.to_string().contains("not-a-valid-tag"));
    }

    #[test]
    fn test_parse_rejects_short_version() {
        let err = ParsedTag::parse("v14.0-1651732108-1f914006").unwrap_err();
        assert!(matches!(err, ResolveError::TagParse { .. }));
        assert!(err.to_string().contains("three numeric components"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_build_counter() {
        let err = ParsedTag::parse("v14.0.3-build-x-1651732108-1f914006").unwrap_err();
        assert!(matches!(err, ResolveError::TagParse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_architecture() {
        assert!(ParsedTag::parse("v14.0.3-1651732108-1f914006-ubuntu22.04-riscv64").is_err());
    }

    #[test]
    fn test_arch_spellings_stay_literal() {
        let linux = ParsedTag::parse("v15.0.7-1672862029-23e51f2c-almalinux8-aarch64").unwrap();
        let mac = ParsedTag::parse("v15.0.7-1672862029-23e51f2c-macos-arm64").unwrap();
        assert_eq!(linux.architecture, "aarch64");
        assert_eq!(mac.architecture, "arm64");
        assert_eq!(mac.os_name_and_version, "macos");
    }

    #[test]
    fn test_round_trip_preserves_raw_tag() {
        for raw in [
            "v14.0.3-1651732108-1f914006-ubuntu22.04-x86_64",
            "v16.0.6-build-2-1708929242-b5e2c76f-almalinux8-x86_64",
            "v11.1.0-1633099975-130bd22e",
        ] {
            assert_eq!(ParsedTag::parse(raw).unwrap().tag, raw);
        }
    }

    #[test]
    fn test_dataset_record_round_trip() {
        let parsed =
            ParsedTag::parse("v16.0.6-build-2-1708929242-b5e2c76f-almalinux8-x86_64").unwrap();
        let json = serde_json::to_string(&parsed).unwrap();
        let reparsed: ParsedTag = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reparsed);
    }
}
