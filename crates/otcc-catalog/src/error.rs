//! Catalog-specific error types.
//!
//! Every variant that originates in a file carries the path, so a failed
//! load points the catalog author at the right file.

use std::path::PathBuf;

use otcc_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or validating a control catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The catalog file was not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The catalog file extension is neither YAML nor JSON.
    #[error("unsupported catalog format {extension:?} at {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Two controls share an identifier.
    #[error("duplicate control id: {control_id}")]
    DuplicateControl { control_id: String },

    /// The catalog defines no controls.
    #[error("catalog contains no controls")]
    Empty,

    /// A control definition failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
