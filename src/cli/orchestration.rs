//! Main scan workflow orchestration
//!
//! Keeps repository selection and scanning apart from argument parsing so the
//! workflow can be driven programmatically or against a mock tag source.

use crate::config::{Config, Repository};
use crate::error::{Result, ScanError};
use crate::git::TagSource;
use crate::scanner::{ScanReport, Scanner};
use crate::ui::{self, OutputConfig};
use tracing::debug;

/// Arguments for the scan workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanWorkflowArgs {
    /// Scan only the repository with this name
    pub repository: Option<String>,

    /// Format and verbosity of the printed report
    pub output: OutputConfig,
}

/// Pick the repositories to scan: the named one, or all of them.
///
/// # Returns
/// * `Ok(Vec<&Repository>)` - Repositories in configuration order
/// * `Err(ScanError::Config)` - The named repository is not configured
pub fn select_repositories<'a>(
    config: &'a Config,
    name: Option<&str>,
) -> Result<Vec<&'a Repository>> {
    match name {
        Some(name) => config
            .find_repository(name)
            .map(|repo| vec![repo])
            .ok_or_else(|| {
                ScanError::config(format!(
                    "Repository '{}' not found in configuration",
                    name
                ))
            }),
        None => Ok(config.repositories.iter().collect()),
    }
}

/// Main scan workflow
///
/// 1. Select the repositories to scan
/// 2. List each repository's tags and pick the latest under its policy
/// 3. Compare against the configured current version
///
/// Per-repository failures are part of the returned report; only selection
/// problems are returned as errors.
pub fn run_scan_workflow<S: TagSource>(
    args: &ScanWorkflowArgs,
    config: &Config,
    source: S,
) -> Result<ScanReport> {
    let repos = select_repositories(config, args.repository.as_deref())?;
    debug!(count = repos.len(), "scanning repositories");
    ui::display_scan_header(repos.len(), args.output);

    let scanner = Scanner::new(source);
    Ok(scanner.scan(repos))
}
