use crate::config::Repository;
use crate::error::{Result, ScanError};
use crate::git::{tag_name_from_ref, Credentials, TagSource};
use git2::{Direction, Remote};
use tracing::debug;

/// Lists tags of a remote repository with libgit2, without cloning it.
///
/// Equivalent to `git ls-remote --tags --refs <url>`: the remote is opened
/// detached from any local repository and only its advertised refs are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2TagSource;

impl Git2TagSource {
    pub fn new() -> Self {
        Git2TagSource
    }
}

impl TagSource for Git2TagSource {
    fn list_tags(&self, repo: &Repository) -> Result<Vec<String>> {
        let credentials = Credentials::from_config(repo.auth.as_ref())?;
        let url = credentials.remote_url(&repo.url);

        debug!(repository = %repo.name, url = %repo.url, "listing remote tags");

        let mut remote = Remote::create_detached(url.as_str())?;
        let connection = remote
            .connect_auth(Direction::Fetch, Some(credentials.remote_callbacks()), None)
            .map_err(|e| {
                ScanError::remote(format!(
                    "failed to list tags of {}: {}",
                    repo.url,
                    e.message()
                ))
            })?;

        let tags: Vec<String> = connection
            .list()?
            .iter()
            .filter_map(|head| tag_name_from_ref(head.name()))
            .map(str::to_string)
            .collect();

        debug!(repository = %repo.name, count = tags.len(), "remote tags listed");

        if tags.is_empty() {
            return Err(ScanError::NoTags);
        }
        Ok(tags)
    }
}
