use crate::domain::Scheme;

/// Per-repository rules governing how tags are interpreted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersioningPolicy {
    pub scheme: Scheme,
    /// Literal prefix removed before comparison and put back on the reported tag
    pub ignore_prefix: Option<String>,
    /// Substrings that exclude a tag from consideration
    pub ignore_suffixes: Vec<String>,
}

impl VersioningPolicy {
    /// Create a policy with no prefix or suffix rules
    pub fn new(scheme: Scheme) -> Self {
        VersioningPolicy {
            scheme,
            ignore_prefix: None,
            ignore_suffixes: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.ignore_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    fn prefix(&self) -> Option<&str> {
        self.ignore_prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Remove the configured prefix. Values without it are returned unchanged.
    pub fn strip_prefix<'a>(&self, value: &'a str) -> &'a str {
        match self.prefix() {
            Some(prefix) => value.strip_prefix(prefix).unwrap_or(value),
            None => value,
        }
    }

    /// Whether `value` carries the configured prefix (always true without one)
    pub fn has_prefix(&self, value: &str) -> bool {
        self.prefix().map_or(true, |prefix| value.starts_with(prefix))
    }

    /// Put the configured prefix back in front of a stripped tag
    pub fn apply_prefix(&self, value: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}{}", prefix, value),
            None => value.to_string(),
        }
    }

    /// Tags eligible for selection, with the prefix removed.
    ///
    /// When a prefix is configured, tags that do not start with it are dropped:
    /// re-applying the prefix to them would name a tag that does not exist.
    pub fn candidate_tags(&self, tags: &[String]) -> Vec<String> {
        match self.prefix() {
            Some(prefix) => tags
                .iter()
                .filter_map(|tag| tag.strip_prefix(prefix))
                .map(str::to_string)
                .collect(),
            None => tags.to_vec(),
        }
    }
}
