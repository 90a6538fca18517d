//! Shared YAML/JSON loading with path-carrying errors.
//!
//! All catalog loading goes through these functions so a missing file and a
//! malformed file are reported the same way regardless of format.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{CatalogError, CatalogResult};

fn read_file(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| CatalogError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML or JSON file, chosen by extension.
///
/// `.yaml` and `.yml` parse as YAML, `.json` as JSON; anything else is
/// [`CatalogError::UnsupportedFormat`].
pub fn load_typed<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let extension = otcc_core::extension_of(path);
    match extension.as_str() {
        "yaml" | "yml" => load_yaml_typed(path),
        "json" => load_json_typed(path),
        _ => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
