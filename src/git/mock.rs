use crate::config::Repository;
use crate::error::{Result, ScanError};
use crate::git::TagSource;
use std::collections::HashMap;

/// Mock tag source for testing without network access
#[derive(Debug, Default)]
pub struct MockTagSource {
    tags: HashMap<String, Vec<String>>,
    failures: HashMap<String, String>,
}

impl MockTagSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tags advertised for a repository name
    pub fn add_tags<I, S>(&mut self, repo_name: impl Into<String>, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .insert(repo_name.into(), tags.into_iter().map(Into::into).collect());
    }

    /// Make listing fail for a repository name
    pub fn add_failure(&mut self, repo_name: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(repo_name.into(), message.into());
    }
}

impl TagSource for MockTagSource {
    fn list_tags(&self, repo: &Repository) -> Result<Vec<String>> {
        if let Some(message) = self.failures.get(&repo.name) {
            return Err(ScanError::remote(message.clone()));
        }

        match self.tags.get(&repo.name) {
            Some(tags) if !tags.is_empty() => Ok(tags.clone()),
            _ => Err(ScanError::NoTags),
        }
    }
}
