//! Remote tag listing abstraction
//!
//! The scanner only needs the tag names a remote advertises. [TagSource] hides
//! how they are obtained so the scan pipeline can run against a real remote or
//! an in-memory fixture.
//!
//! - [remote::Git2TagSource]: lists refs over the network with the `git2` crate
//! - [mock::MockTagSource]: fixed tag lists for tests

pub mod auth;
pub mod mock;
pub mod remote;

pub use auth::{authenticated_url, Credentials};
pub use mock::MockTagSource;
pub use remote::Git2TagSource;

use crate::config::Repository;
use crate::error::Result;

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Source of raw tag names for a configured repository
///
/// Implementors must be `Send + Sync` so one source can serve scans of many
/// repositories.
pub trait TagSource: Send + Sync {
    /// List tag names (without the `refs/tags/` prefix) in advertisement order.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - At least one tag name
    /// * `Err(ScanError::NoTags)` - The remote has no tags
    /// * `Err` - Authentication, transport or other git failures
    fn list_tags(&self, repo: &Repository) -> Result<Vec<String>>;
}

/// Extract the tag name from an advertised ref.
///
/// Returns `None` for refs outside `refs/tags/` and for peeled `^{}` entries.
///
/// # Example
/// ```
/// use version_scanner::git::tag_name_from_ref;
///
/// assert_eq!(tag_name_from_ref("refs/tags/v1.2.3"), Some("v1.2.3"));
/// assert_eq!(tag_name_from_ref("refs/tags/v1.2.3^{}"), None);
/// assert_eq!(tag_name_from_ref("refs/heads/main"), None);
/// ```
pub fn tag_name_from_ref(refname: &str) -> Option<&str> {
    refname
        .strip_prefix(TAG_REF_PREFIX)
        .filter(|name| !name.is_empty() && !name.ends_with("^{}"))
}
