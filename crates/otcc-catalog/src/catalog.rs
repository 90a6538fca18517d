//! # Control Catalog
//!
//! The immutable registry of controls an assessment runs against. A catalog
//! is loaded once, validated as a whole, and then only read.
//!
//! ## Ordering
//!
//! Controls keep their file order. Assessment results, domain scores and
//! recommendation tie-breaks all follow it, so the catalog file decides how
//! a report reads.
//!
//! ## Sources
//!
//! - [`ControlCatalog::embedded`]: the six-control OTCC baseline compiled
//!   into the binary from `catalog/otcc.yaml`.
//! - [`ControlCatalog::load`]: any YAML or JSON file with the same shape.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use otcc_core::ControlId;

use crate::control::Control;
use crate::error::{CatalogError, CatalogResult};
use crate::parser;

/// The baseline catalog shipped with the assessor.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/otcc.yaml");

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Catalog name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Catalog version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Control definitions in report order.
    pub controls: Vec<Control>,
}

/// A validated, immutable set of controls.
#[derive(Debug, Clone)]
pub struct ControlCatalog {
    name: String,
    version: Option<String>,
    controls: Vec<Control>,
    index: HashMap<ControlId, usize>,
}

impl ControlCatalog {
    /// Build a catalog from control definitions.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`] if `controls` is empty.
    /// - [`CatalogError::Validation`] if any control is malformed.
    /// - [`CatalogError::DuplicateControl`] if two controls share an id.
    pub fn from_controls(name: impl Into<String>, controls: Vec<Control>) -> CatalogResult<Self> {
        if controls.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut index = HashMap::with_capacity(controls.len());
        for (i, control) in controls.iter().enumerate() {
            control.validate()?;
            if index.insert(control.control_id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateControl {
                    control_id: control.control_id.to_string(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            version: None,
            controls,
            index,
        })
    }

    fn from_file(file: CatalogFile, fallback_name: &str) -> CatalogResult<Self> {
        let name = file.name.unwrap_or_else(|| fallback_name.to_string());
        let mut catalog = Self::from_controls(name, file.controls)?;
        catalog.version = file.version;
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file, "unnamed")
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file, "unnamed")
    }

    /// Load a catalog file (`.yaml`, `.yml` or `.json`).
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let file: CatalogFile = parser::load_typed(path)?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let catalog = Self::from_file(file, &fallback)?;
        tracing::debug!(
            path = %path.display(),
            controls = catalog.len(),
            "loaded control catalog"
        );
        Ok(catalog)
    }

    /// The OTCC baseline catalog compiled into the binary.
    pub fn embedded() -> CatalogResult<Self> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog version, if the source declared one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Look up a control by id.
    pub fn get(&self, id: &ControlId) -> Option<&Control> {
        self.index.get(id).map(|&i| &self.controls[i])
    }

    /// Look up a control by its id string.
    pub fn get_str(&self, id: &str) -> Option<&Control> {
        ControlId::new(id).ok().and_then(|id| self.get(&id))
    }

    /// All controls in catalog order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Iterate controls in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Control> {
        self.controls.iter()
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Always `false` for a constructed catalog; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Distinct domains in order of first appearance.
    pub fn domains(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for control in &self.controls {
            if !seen.contains(&control.domain.as_str()) {
                seen.push(&control.domain);
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a ControlCatalog {
    type Item = &'a Control;
    type IntoIter = std::slice::Iter<'a, Control>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
