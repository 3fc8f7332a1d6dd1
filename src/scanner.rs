//! Per-repository scan: list tags, pick the latest, compare with the current version

use crate::analyzer::{filter_tags, latest_of, needs_update};
use crate::boundary::BoundaryWarning;
use crate::config::Repository;
use crate::domain::VersioningPolicy;
use crate::error::{Result, ScanError};
use crate::git::TagSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Only repository type understood by the scanner
pub const GIT_REPOSITORY: &str = "git";

/// Outcome of scanning one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    UpToDate,
    UpdateAvailable,
    Error,
}

/// Result for one repository, as reported to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub name: String,
    pub status: ScanStatus,
    pub current_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    fn failed(repo: &Repository, latest: Option<String>, message: String) -> Self {
        ScanResult {
            name: repo.name.clone(),
            status: ScanStatus::Error,
            current_version: repo.current_version.clone(),
            latest_version: latest,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ScanStatus::Error
    }

    pub fn has_update(&self) -> bool {
        self.status == ScanStatus::UpdateAvailable
    }
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub up_to_date: usize,
    pub updates_available: usize,
    pub errors: usize,
}

/// Process exit status of a scan run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every repository is up to date
    UpToDate,
    /// At least one repository has a newer tag
    UpdatesAvailable,
    /// Configuration could not be loaded or was invalid
    ConfigError,
    /// At least one repository failed to scan
    ScanError,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::UpToDate => 0,
            ExitStatus::UpdatesAvailable => 1,
            ExitStatus::ConfigError => 2,
            ExitStatus::ScanError => 3,
        }
    }
}

/// All results of one scan run, in configuration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.results.len(),
            ..Summary::default()
        };
        for result in &self.results {
            match result.status {
                ScanStatus::UpToDate => summary.up_to_date += 1,
                ScanStatus::UpdateAvailable => summary.updates_available += 1,
                ScanStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// Errors take precedence over available updates
    pub fn exit_status(&self) -> ExitStatus {
        if self.results.iter().any(ScanResult::is_error) {
            ExitStatus::ScanError
        } else if self.results.iter().any(ScanResult::has_update) {
            ExitStatus::UpdatesAvailable
        } else {
            ExitStatus::UpToDate
        }
    }
}

fn report_warnings(repo: &Repository, warnings: &[BoundaryWarning]) {
    for warning in warnings {
        match warning {
            BoundaryWarning::PrefixMissing { .. } => {
                warn!(repository = %repo.name, "{}", warning)
            }
            _ => debug!(repository = %repo.name, "{}", warning),
        }
    }
}

/// Scans repositories using a [TagSource]
pub struct Scanner<S: TagSource> {
    source: S,
}

impl<S: TagSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner { source }
    }

    /// Find the latest tag of `repo` under `policy`, prefix included.
    pub fn latest_version(&self, repo: &Repository, policy: &VersioningPolicy) -> Result<String> {
        if repo.kind != GIT_REPOSITORY {
            return Err(ScanError::config(format!(
                "unsupported repository type: {}",
                repo.kind
            )));
        }

        let tags = self.source.list_tags(repo)?;
        let candidates = policy.candidate_tags(&tags);

        let mut warnings = Vec::new();
        if let Some(prefix) = &policy.ignore_prefix {
            let skipped = tags.len() - candidates.len();
            if skipped > 0 {
                warnings.push(BoundaryWarning::TagsWithoutPrefix {
                    prefix: prefix.clone(),
                    count: skipped,
                });
            }
        }

        let filtered = filter_tags(&candidates, policy.scheme, &policy.ignore_suffixes);
        warnings.extend(filtered.warnings);
        report_warnings(repo, &warnings);

        let latest = latest_of(&filtered.valid, policy.scheme)?;
        debug!(
            repository = %repo.name,
            latest = %latest,
            scheme = %policy.scheme,
            "selected latest tag"
        );

        Ok(policy.apply_prefix(&latest))
    }

    /// Scan one repository. Failures become an `ERROR` result, never a panic or early exit.
    pub fn scan_repository(&self, repo: &Repository) -> ScanResult {
        let policy = match repo.versioning.policy() {
            Ok(policy) => policy,
            Err(e) => return ScanResult::failed(repo, None, e.to_string()),
        };

        let latest = match self.latest_version(repo, &policy) {
            Ok(latest) => latest,
            Err(e) => {
                debug!(repository = %repo.name, error = %e, "scan failed");
                return ScanResult::failed(repo, None, e.to_string());
            }
        };

        if let Some(prefix) = &policy.ignore_prefix {
            if !policy.has_prefix(&repo.current_version) {
                report_warnings(
                    repo,
                    &[BoundaryWarning::PrefixMissing {
                        value: repo.current_version.clone(),
                        prefix: prefix.clone(),
                    }],
                );
            }
        }

        let status = match needs_update(&repo.current_version, &latest, &policy) {
            Ok(true) => ScanStatus::UpdateAvailable,
            Ok(false) => ScanStatus::UpToDate,
            Err(e) => {
                return ScanResult::failed(
                    repo,
                    Some(latest),
                    format!("Version comparison error: {}", e),
                )
            }
        };

        ScanResult {
            name: repo.name.clone(),
            status,
            current_version: repo.current_version.clone(),
            latest_version: Some(latest),
            error: None,
        }
    }

    /// Scan repositories one after another, keeping their order.
    pub fn scan<'a, I>(&self, repos: I) -> ScanReport
    where
        I: IntoIterator<Item = &'a Repository>,
    {
        ScanReport {
            results: repos
                .into_iter()
                .map(|repo| self.scan_repository(repo))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Versioning;
    use crate::git::MockTagSource;

    fn repo(name: &str, current: &str, versioning: Versioning) -> Repository {
        Repository {
            name: name.to_string(),
            kind: GIT_REPOSITORY.to_string(),
            url: format!("https://example.com/{}.git", name),
            current_version: current.to_string(),
            versioning,
            auth: None,
        }
    }

    fn scanner(name: &str, tags: &[&str]) -> Scanner<MockTagSource> {
        let mut source = MockTagSource::new();
        source.add_tags(name, tags.iter().copied());
        Scanner::new(source)
    }

    #[test]
    fn test_scan_update_available() {
        let scanner = scanner("app", &["v1.2.0", "v1.3.0", "v1.2.5"]);
        let result = scanner.scan_repository(&repo("app", "v1.2.0", Versioning::default()));

        assert_eq!(result.status, ScanStatus::UpdateAvailable);
        assert_eq!(result.latest_version.as_deref(), Some("v1.3.0"));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_scan_up_to_date() {
        let scanner = scanner("app", &["v1.0.0", "v1.0.0-rc.1"]);
        let result = scanner.scan_repository(&repo("app", "v1.0.0", Versioning::default()));
        assert_eq!(result.status, ScanStatus::UpToDate);
    }

    #[test]
    fn test_scan_reapplies_prefix() {
        let scanner = scanner(
            "nginx",
            &["release-1.24.0", "release-1.25.3", "stable-9.9.9", "release-1.25.3-rc"],
        );
        let versioning = Versioning {
            ignore_prefix: Some("release-".to_string()),
            ignore_suffixes: vec!["rc".to_string()],
            ..Versioning::default()
        };
        let result = scanner.scan_repository(&repo("nginx", "release-1.24.0", versioning));

        assert_eq!(result.latest_version.as_deref(), Some("release-1.25.3"));
        assert_eq!(result.status, ScanStatus::UpdateAvailable);
    }

    #[test]
    fn test_scan_unsupported_scheme_is_error_result() {
        let scanner = scanner("app", &["v1.0.0"]);
        let versioning = Versioning {
            scheme: Some("romver".to_string()),
            ..Versioning::default()
        };
        let result = scanner.scan_repository(&repo("app", "v1.0.0", versioning));

        assert!(result.is_error());
        assert_eq!(
            result.error.as_deref(),
            Some("unsupported versioning scheme: romver")
        );
    }

    #[test]
    fn test_scan_invalid_current_version_keeps_latest() {
        let scanner = scanner("app", &["v1.0.0"]);
        let result = scanner.scan_repository(&repo("app", "latest", Versioning::default()));

        assert!(result.is_error());
        assert_eq!(result.latest_version.as_deref(), Some("v1.0.0"));
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .starts_with("Version comparison error"));
    }

    #[test]
    fn test_scan_no_valid_tags() {
        let scanner = scanner("app", &["nightly", "latest"]);
        let result = scanner.scan_repository(&repo("app", "v1.0.0", Versioning::default()));
        assert_eq!(
            result.error.as_deref(),
            Some("no valid semver tags found after filtering")
        );
    }

    #[test]
    fn test_scan_unsupported_repository_type() {
        let scanner = scanner("app", &["v1.0.0"]);
        let mut svn = repo("app", "v1.0.0", Versioning::default());
        svn.kind = "svn".to_string();

        let result = scanner.scan_repository(&svn);
        assert!(result.error.unwrap().contains("unsupported repository type: svn"));
    }

    #[test]
    fn test_report_summary_and_exit_status() {
        let mut source = MockTagSource::new();
        source.add_tags("a", ["1.0.0"]);
        source.add_tags("b", ["2.0.0"]);
        source.add_failure("c", "timeout");
        let scanner = Scanner::new(source);

        let repos = vec![
            repo("a", "1.0.0", Versioning::default()),
            repo("b", "1.0.0", Versioning::default()),
        ];
        let report = scanner.scan(&repos);
        assert_eq!(
            report.summary(),
            Summary {
                total: 2,
                up_to_date: 1,
                updates_available: 1,
                errors: 0
            }
        );
        assert_eq!(report.exit_status(), ExitStatus::UpdatesAvailable);

        let repos = vec![
            repo("a", "1.0.0", Versioning::default()),
            repo("c", "1.0.0", Versioning::default()),
        ];
        let report = scanner.scan(&repos);
        assert_eq!(report.summary().errors, 1);
        assert_eq!(report.exit_status(), ExitStatus::ScanError);
        assert_eq!(report.exit_status().code(), 3);

        let report = scanner.scan(&repos[..1]);
        assert_eq!(report.exit_status(), ExitStatus::UpToDate);
        assert_eq!(report.exit_status().code(), 0);
    }

    #[test]
    fn test_scan_result_json_shape() {
        let scanner = scanner("app", &["2024.05.1", "2024.04.9"]);
        let versioning = Versioning {
            scheme: Some("calver".to_string()),
            ..Versioning::default()
        };
        let result = scanner.scan_repository(&repo("app", "2024.05.1", versioning));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "UP_TO_DATE");
        assert_eq!(json["currentVersion"], "2024.05.1");
        assert_eq!(json["latestVersion"], "2024.05.1");
        assert!(json.get("error").is_none());
    }
}
