use crate::domain::{version, VersioningPolicy};
use crate::error::Result;
use std::cmp::Ordering;

/// Decide whether `current` is older than `latest` under `policy`.
///
/// The policy prefix is stripped from both sides first (a no-op for a value that
/// does not carry it). Either side failing to parse is an error, never "no update".
pub fn needs_update(current: &str, latest: &str, policy: &VersioningPolicy) -> Result<bool> {
    let current = policy.strip_prefix(current);
    let latest = policy.strip_prefix(latest);

    let ordering = version::compare(current, latest, policy.scheme)?;
    Ok(ordering == Ordering::Less)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scheme;
    use crate::error::ScanError;

    fn semver() -> VersioningPolicy {
        VersioningPolicy::new(Scheme::SemVer)
    }

    #[test]
    fn test_needs_update_newer_latest() {
        assert!(needs_update("v1.0.0", "v1.1.0", &semver()).unwrap());
        assert!(needs_update("1.0.0", "v1.0.1", &semver()).unwrap());
    }

    #[test]
    fn test_up_to_date_when_equal_or_newer() {
        assert!(!needs_update("v1.1.0", "v1.1.0", &semver()).unwrap());
        assert!(!needs_update("v2.0.0", "v1.9.9", &semver()).unwrap());
        assert!(!needs_update("1.0.0+build.1", "1.0.0+build.2", &semver()).unwrap());
    }

    #[test]
    fn test_release_not_older_than_its_pre_release() {
        assert!(!needs_update("v1.0.0", "v1.0.0-rc.1", &semver()).unwrap());
        assert!(needs_update("v1.0.0-rc.1", "v1.0.0", &semver()).unwrap());
    }

    #[test]
    fn test_prefix_stripped_from_both_sides() {
        let policy = semver().with_prefix("release-");
        assert!(needs_update("release-1.0.0", "release-1.2.0", &policy).unwrap());
        // Missing prefix on current is tolerated
        assert!(needs_update("1.0.0", "release-1.2.0", &policy).unwrap());
    }

    #[test]
    fn test_calver_and_string_schemes() {
        let calver = VersioningPolicy::new(Scheme::CalVer);
        assert!(needs_update("2024.04.9", "2024.05.1", &calver).unwrap());
        assert!(!needs_update("2024.05.1", "2024.5.1", &calver).unwrap());

        let string = VersioningPolicy::new(Scheme::String);
        assert!(needs_update("a", "b", &string).unwrap());
        assert!(!needs_update("b", "b", &string).unwrap());
    }

    #[test]
    fn test_parse_failure_is_error() {
        let err = needs_update("not-a-version", "1.0.0", &semver()).unwrap_err();
        assert!(
            matches!(err, ScanError::InvalidVersion { ref value, .. } if value == "not-a-version")
        );

        let err = needs_update("1.0.0", "garbage", &semver()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidVersion { ref value, .. } if value == "garbage"));

        let calver = VersioningPolicy::new(Scheme::CalVer);
        assert!(needs_update("2024.1", "2024.1.1", &calver).is_err());
    }
}
