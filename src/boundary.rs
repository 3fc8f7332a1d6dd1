use crate::domain::Scheme;
use std::fmt;

/// Warnings raised while interpreting a repository's tags.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag is valid for the scheme but contains an ignored substring
    TagIgnoredBySuffix { tag: String, suffix: String },
    /// Tags that do not parse under the repository's scheme
    InvalidTagsSkipped { scheme: Scheme, count: usize },
    /// Tags that lack the configured prefix and were never considered
    TagsWithoutPrefix { prefix: String, count: usize },
    /// Configured version lacks the prefix, so it is compared unstripped
    PrefixMissing { value: String, prefix: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::TagIgnoredBySuffix { tag, suffix } => {
                write!(f, "Ignoring tag '{}' due to suffix '{}'", tag, suffix)
            }
            BoundaryWarning::InvalidTagsSkipped { scheme, count } => {
                write!(f, "Skipped {} tag(s) that are not valid {}", count, scheme)
            }
            BoundaryWarning::TagsWithoutPrefix { prefix, count } => {
                write!(
                    f,
                    "Skipped {} tag(s) without the ignored prefix '{}'",
                    count, prefix
                )
            }
            BoundaryWarning::PrefixMissing { value, prefix } => {
                write!(
                    f,
                    "Version '{}' does not start with prefix '{}'; comparing it unstripped",
                    value, prefix
                )
            }
        }
    }
}
