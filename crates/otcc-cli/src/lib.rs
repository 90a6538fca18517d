//! # otcc-cli — Command-Line Front End
//!
//! Provides the `otcc` binary.
//!
//! ## Subcommands
//!
//! - `otcc analyze` — Assess documents and write `results.json`.
//! - `otcc catalog list` — Show the controls of the active catalog.
//! - `otcc catalog validate` — Check a catalog file.
//!
//! ## Output Discipline
//!
//! stdout carries only machine-readable output (progress events, catalog
//! listings). Logs go to stderr through `tracing`.
//!
//! ```bash
//! otcc analyze --assessment-id a-42 --output-dir out --documents '["policy.pdf"]'
//! otcc -v catalog list
//! otcc catalog validate catalogs/extended.yaml
//! ```

pub mod analyze;
pub mod catalog;
pub mod config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<analyze::AnalyzeArgs>();
        let _ = std::any::type_name::<catalog::CatalogArgs>();
        let _ = std::any::type_name::<config::CliConfig>();
    }
}
