//! # otcc-core — Foundational Types for the OTCC Assessor
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate shares: validated control identifiers, the document type
//! taxonomy, the text-extraction seam, SHA-256 hex digests and the error
//! hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** A `ControlId` is validated at
//!    construction (`<domain>-<section>-<item>`). No bare strings cross a
//!    crate boundary where an identifier is meant.
//!
//! 2. **Single `DocumentType` enum.** One definition, exhaustive `match`
//!    everywhere, one string form shared by serde and `Display`.
//!
//! 3. **Extraction is a trait, not a dependency.** The scoring engine never
//!    links a PDF or ZIP reader; it only sees [`TextExtractor`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `otcc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod document;
pub mod error;
pub mod extract;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use digest::sha256_hex;
pub use document::{AnalyzedDocument, DocumentType};
pub use error::{ExtractError, OtccError, ValidationError};
pub use extract::{extension_of, DocumentFormat, TextExtractor};
pub use identity::ControlId;
