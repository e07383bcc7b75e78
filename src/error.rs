// Error taxonomy for release resolution

use crate::release::selector::SelectionCriteria;
use crate::release::tag::ParsedTag;
use thiserror::Error;

/// Failures produced by the tag parsing and release selection core.
///
/// Every variant carries the data a caller needs to branch programmatically:
/// the offending tag, or the selection criteria plus the candidates involved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot parse release tag '{tag}': {reason}")]
    TagParse { tag: String, reason: String },

    #[error("no release found for {criteria}")]
    NoMatchingRelease { criteria: SelectionCriteria },

    #[error(
        "multiple releases for {criteria} share the same highest version:\n{}",
        one_per_line(.candidates)
    )]
    AmbiguousRelease {
        criteria: SelectionCriteria,
        candidates: Vec<ParsedTag>,
    },
}

fn one_per_line(tags: &[ParsedTag]) -> String {
    tags.iter()
        .map(|tag| format!("    {tag}"))
        .collect::<Vec<_>>()
        .join("\n")
}
