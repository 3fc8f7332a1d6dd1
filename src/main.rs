use anyhow::Result;
use clap::{Parser, Subcommand};

use version_scanner::cli::{run_scan_workflow, ScanWorkflowArgs};
use version_scanner::config;
use version_scanner::git::Git2TagSource;
use version_scanner::logging;
use version_scanner::scanner::ExitStatus;
use version_scanner::ui::{self, OutputConfig, OutputFormat, Verbosity};

#[derive(Parser)]
#[command(
    name = "version-scanner",
    version,
    about = "Monitor git repositories for release tags newer than your deployed versions"
)]
struct Args {
    #[arg(long, global = true, help = "Path to configuration file (default: repos.json)")]
    file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Only report repositories that need attention")]
    quiet: bool,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Output format"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan configured repositories for version updates
    Scan {
        /// Scan only the repository with this name
        repository: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output = OutputConfig {
        format: args.format,
        verbosity: Verbosity::from_flags(args.verbose, args.quiet),
    };
    logging::init_logging(output.verbosity);

    match args.command {
        Command::Scan { repository } => scan(args.file.as_deref(), repository, output),
    }
}

fn scan(config_path: Option<&str>, repository: Option<String>, output: OutputConfig) -> Result<()> {
    let config = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(ExitStatus::ConfigError.code());
        }
    };

    let workflow_args = ScanWorkflowArgs { repository, output };
    let report = match run_scan_workflow(&workflow_args, &config, Git2TagSource::new()) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(ExitStatus::ConfigError.code());
        }
    };

    ui::print_report(&report, output)?;

    match report.exit_status() {
        ExitStatus::UpToDate => Ok(()),
        status => std::process::exit(status.code()),
    }
}
