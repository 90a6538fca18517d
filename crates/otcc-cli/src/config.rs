//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! catalog: catalogs/otcc-extended.yaml
//! output_dir: out/assessment
//! detailed_export: true
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use otcc_catalog::ControlCatalog;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Catalog file to assess against instead of the embedded baseline.
    pub catalog: Option<PathBuf>,
    /// Default output directory for `analyze`.
    pub output_dir: Option<PathBuf>,
    /// Write `assessment_details.json` alongside `results.json`.
    pub detailed_export: bool,
}

impl CliConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load the config at `path`, or the defaults when no path is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the control catalog: `flag` wins over the config file, and
    /// the embedded baseline is used when neither names one.
    pub fn resolve_catalog(&self, flag: Option<&Path>) -> Result<ControlCatalog> {
        match flag.or(self.catalog.as_deref()) {
            Some(path) => {
                tracing::info!(catalog = %path.display(), "loading control catalog");
                ControlCatalog::load(path)
                    .with_context(|| format!("failed to load catalog: {}", path.display()))
            }
            None => ControlCatalog::embedded().context("embedded catalog is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(CliConfig::from_yaml_str("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::from_yaml_str("  \n").unwrap(), CliConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let cfg = CliConfig::from_yaml_str(
            "catalog: cat.yaml\noutput_dir: out\ndetailed_export: true\n",
        )
        .unwrap();
        assert_eq!(cfg.catalog, Some(PathBuf::from("cat.yaml")));
        assert_eq!(cfg.output_dir, Some(PathBuf::from("out")));
        assert!(cfg.detailed_export);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(CliConfig::from_yaml_str("outptu_dir: typo\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.yaml"));
    }

    #[test]
    fn no_path_yields_defaults() {
        assert_eq!(CliConfig::load_optional(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn embedded_catalog_when_nothing_configured() {
        let catalog = CliConfig::default().resolve_catalog(None).unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn flag_overrides_config_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.yaml");
        std::fs::write(
            &path,
            "name: one\ncontrols:\n  - control_id: \"9-1-1\"\n    domain: D\n    subdomain: S\n    \
             description: Desc\n    keywords: [alpha]\n    required_evidence: [beta]\n",
        )
        .unwrap();
        let cfg = CliConfig {
            catalog: Some(dir.path().join("missing.yaml")),
            ..CliConfig::default()
        };
        let catalog = cfg.resolve_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(cfg.resolve_catalog(None).is_err());
    }
}
