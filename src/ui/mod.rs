//! Terminal output: status messages and scan report rendering

pub mod formatter;

pub use formatter::{render_human, render_json};

use crate::scanner::ScanReport;
use console::{style, Term};

/// Output format of the scan report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Human,
    /// JSON document for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only repositories that need attention
    Quiet,
    #[default]
    Normal,
    /// Normal output plus debug logging
    Verbose,
}

impl Verbosity {
    /// Quiet wins when both flags are given
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// How a report should be printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Announce the scan unless output is quiet or machine-readable.
pub fn display_scan_header(count: usize, output: OutputConfig) {
    if output.format == OutputFormat::Human && output.verbosity != Verbosity::Quiet {
        println!("Scanning {} repositories...\n", count);
    }
}

/// Print the report to stdout in the configured format.
pub fn print_report(report: &ScanReport, output: OutputConfig) -> serde_json::Result<()> {
    match output.format {
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Human => {
            let color = Term::stdout().features().colors_supported();
            print!("{}", render_human(report, output.verbosity, color));
        }
    }
    Ok(())
}
