//! Pure formatting functions for scan results.
//!
//! Rendering returns strings so that output can be tested without a terminal;
//! callers decide where to print them.

use crate::scanner::{ScanReport, ScanResult, ScanStatus, Summary};
use crate::ui::Verbosity;
use console::style;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    repositories: &'a [ScanResult],
}

/// Render one human-readable line per repository followed by a summary.
///
/// Quiet mode hides up-to-date repositories and the summary, leaving only
/// repositories that need attention.
///
/// # Arguments
/// * `report` - Results to render
/// * `verbosity` - Quiet suppresses up-to-date lines and the summary
/// * `color` - Whether to emit ANSI styling
pub fn render_human(report: &ScanReport, verbosity: Verbosity, color: bool) -> String {
    let quiet = verbosity == Verbosity::Quiet;
    let mut out = String::new();

    for result in &report.results {
        let line = match result.status {
            ScanStatus::UpToDate if quiet => continue,
            ScanStatus::UpToDate => format!(
                "- {}: {} (Current: {})",
                result.name,
                style("UP-TO-DATE").green().force_styling(color),
                result.current_version
            ),
            ScanStatus::UpdateAvailable => format!(
                "- {}: {} (Current: {} -> Latest: {})",
                result.name,
                style("NEW VERSION FOUND!").yellow().bold().force_styling(color),
                result.current_version,
                result.latest_version.as_deref().unwrap_or_default()
            ),
            ScanStatus::Error => format!(
                "- {}: {} ({})",
                result.name,
                style("ERROR!").red().bold().force_styling(color),
                result.error.as_deref().unwrap_or_default()
            ),
        };
        let _ = writeln!(out, "{}", line);
    }

    if !quiet {
        let summary = report.summary();
        let _ = write!(
            out,
            "\nScan finished. Updates available for {} repository(ies).",
            summary.updates_available
        );
        if summary.errors > 0 {
            let _ = write!(out, " {} error(s) occurred.", summary.errors);
        }
        out.push('\n');
    }

    out
}

/// Render the report as pretty-printed JSON with a summary block.
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        summary: report.summary(),
        repositories: &report.results,
    })
}
