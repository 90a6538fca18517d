//! # otcc CLI entry point
//!
//! Parses command-line arguments, installs logging, resolves configuration
//! and the control catalog, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use otcc_cli::analyze::{run_analyze, AnalyzeArgs};
use otcc_cli::catalog::{run_catalog, CatalogArgs};
use otcc_cli::config::CliConfig;

/// OTCC document assessor
///
/// Scores compliance documents against the OT Cybersecurity Controls
/// catalog and writes a report with prioritized recommendations.
#[derive(Parser, Debug)]
#[command(name = "otcc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Control catalog file. Defaults to the embedded OTCC baseline.
    #[arg(long = "catalog", global = true)]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess documents and write the compliance report.
    Analyze(AnalyzeArgs),

    /// Inspect or validate control catalogs.
    Catalog(CatalogArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "otcc CLI starting");

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let config = CliConfig::load_optional(cli.config.as_deref())?;
    let catalog = config.resolve_catalog(cli.catalog_file.as_deref())?;

    match &cli.command {
        Commands::Analyze(args) => run_analyze(args, &catalog, &config),
        Commands::Catalog(args) => run_catalog(args, &catalog),
    }
}
