//! Assessment engine errors.
//!
//! Scoring is infallible; these cover building keyword matchers and the
//! filesystem edges of a session.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the assessment engine.
#[derive(Debug, Error)]
pub enum AssessError {
    /// A keyword could not be compiled into a matcher.
    #[error("failed to build matcher for keyword {keyword:?} of control {control_id}: {source}")]
    Pattern {
        control_id: String,
        keyword: String,
        source: regex::Error,
    },

    /// A document directory could not be listed.
    #[error("failed to read directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization of results failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for assessment operations.
pub type AssessResult<T> = Result<T, AssessError>;
