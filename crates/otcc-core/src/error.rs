//! # Error Hierarchy
//!
//! Structured error types shared across the OTCC assessor, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Scoring itself is infallible: absence of evidence is a result, not an
//! error. The variants here cover the edges of the system, namely malformed
//! identifiers, malformed catalogs and unreadable documents.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the OTCC assessor.
#[derive(Error, Debug)]
pub enum OtccError {
    /// The document list supplied by the caller is malformed.
    #[error("invalid document list: {0}")]
    InvalidDocumentList(String),
}

/// Validation errors for identifiers and control definitions.
///
/// Each variant carries the offending input so that a catalog author can
/// fix the source file without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Control identifier does not match `<domain>-<section>-<item>`.
    #[error("invalid control id \"{0}\" (expected <domain>-<section>-<item>, e.g. 2-11-1)")]
    InvalidControlId(String),

    /// A control was defined without any search keywords.
    #[error("control {control_id} has no keywords")]
    EmptyKeywords {
        /// The control missing keywords.
        control_id: String,
    },

    /// A control was defined without any required evidence terms.
    #[error("control {control_id} has no required evidence terms")]
    EmptyRequiredEvidence {
        /// The control missing required evidence.
        control_id: String,
    },

    /// A required text field was blank.
    #[error("control {control_id}: field `{field}` must not be empty")]
    EmptyField {
        /// The control with the blank field.
        control_id: String,
        /// Name of the blank field.
        field: &'static str,
    },

    /// A keyword or evidence term was blank.
    #[error("control {control_id}: blank entry in `{field}`")]
    BlankTerm {
        /// The control with the blank term.
        control_id: String,
        /// Name of the list containing the blank term.
        field: &'static str,
    },
}

/// Errors raised by a [`TextExtractor`](crate::TextExtractor).
///
/// These never propagate through the scoring engine: the session logs them
/// and treats the document as empty.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file extension is not one the assessor reads.
    #[error("unsupported file type {extension:?}: {path}")]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
        /// Lower-cased extension, empty if none.
        extension: String,
    },

    /// The file exists but its contents could not be decoded.
    #[error("failed to extract text from {path}: {reason}")]
    Decode {
        /// The offending file.
        path: PathBuf,
        /// Reader-specific failure description.
        reason: String,
    },

    /// I/O failure while reading the file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
