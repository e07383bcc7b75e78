// Deterministic best-release selection over a filtered catalog

use crate::error::ResolveError;
use crate::release::catalog::ReleaseCatalog;
use crate::release::tag::ParsedTag;
use log::warn;
use std::fmt;

/// The (major version, OS, architecture) triple a lookup was performed for.
/// Embedded verbatim in every selection error so operators can diagnose
/// catalog gaps without re-deriving the failing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub major_version: u32,
    pub os_name_and_version: String,
    pub architecture: String,
}

impl fmt::Display for SelectionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "major version {}, OS/version {}, architecture {}",
            self.major_version, self.os_name_and_version, self.architecture
        )
    }
}

/// Picks exactly one release from `candidates` or fails.
///
/// With multiple candidates the one with the maximum
/// (major, minor, patch, build counter, build timestamp) key wins. A tie at
/// the maximum key means the catalog carries two distinct builds of the
/// identical version and platform; that is never resolved silently.
pub fn select_release<'a>(
    candidates: &'a ReleaseCatalog,
    known: &ReleaseCatalog,
    criteria: &SelectionCriteria,
) -> Result<&'a ParsedTag, ResolveError> {
    let tags = candidates.tags();

    if candidates.is_empty() {
        warn!(
            "No release found for {criteria}. Known releases:\n{}",
            known.one_per_line(4)
        );
        return Err(ResolveError::NoMatchingRelease {
            criteria: criteria.clone(),
        });
    }

    if let [only] = tags {
        return Ok(only);
    }

    let max_key = tags
        .iter()
        .map(ParsedTag::version_key)
        .max()
        .expect("candidate set checked non-empty above");
    let highest: Vec<&ParsedTag> = tags
        .iter()
        .filter(|tag| tag.version_key() == max_key)
        .collect();

    if let [winner] = highest.as_slice() {
        return Ok(*winner);
    }

    Err(ResolveError::AmbiguousRelease {
        criteria: criteria.clone(),
        candidates: highest.into_iter().cloned().collect(),
    })
}
