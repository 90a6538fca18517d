//! # Catalog CLI — Inspect and validate control catalogs.
//!
//! ```bash
//! # Controls of the active catalog (embedded baseline unless --catalog):
//! otcc catalog list
//!
//! # Check a catalog file before using it:
//! otcc catalog validate catalogs/otcc-extended.yaml
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use otcc_catalog::ControlCatalog;

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Available catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List the controls of the active catalog.
    List,

    /// Load and validate a catalog file.
    Validate {
        /// Path to a YAML or JSON catalog.
        path: PathBuf,
    },
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, catalog: &ControlCatalog) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        CatalogCommand::List => run_list(catalog, &mut out),
        CatalogCommand::Validate { path } => run_validate(path, &mut out),
    }
}

fn run_list<W: Write>(catalog: &ControlCatalog, out: &mut W) -> Result<u8> {
    writeln!(
        out,
        "Catalog: {} (version {})",
        catalog.name(),
        catalog.version().unwrap_or("unversioned")
    )?;
    writeln!(out)?;
    for control in catalog {
        writeln!(
            out,
            "  {:<8} {:<28} {}",
            control.control_id.as_str(),
            control.domain,
            control.description
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Total: {} controls across {} domains",
        catalog.len(),
        catalog.domains().len()
    )?;
    Ok(0)
}

fn run_validate<W: Write>(path: &Path, out: &mut W) -> Result<u8> {
    match ControlCatalog::load(path) {
        Ok(catalog) => {
            writeln!(
                out,
                "OK: {} ({} controls, {} keywords)",
                path.display(),
                catalog.len(),
                catalog.iter().map(|c| c.keywords.len()).sum::<usize>()
            )?;
            Ok(0)
        }
        Err(e) => {
            tracing::error!(catalog = %path.display(), error = %e, "catalog validation failed");
            writeln!(out, "FAIL: {}: {e}", path.display())?;
            Ok(1)
        }
    }
}
