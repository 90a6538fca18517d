//! # otcc-catalog — Control Catalog
//!
//! Loads the set of OT/ICS cybersecurity controls an assessment runs
//! against. The catalog is data, not code: controls live in a declarative
//! YAML (or JSON) file, so updating a keyword list does not require a
//! rebuild. The OTCC baseline ships embedded for zero-configuration use.
//!
//! - **Control** (`control.rs`): one control definition and its invariants.
//! - **Catalog** (`catalog.rs`): the validated, ordered, immutable registry.
//! - **Parser** (`parser.rs`): YAML/JSON loading with path-carrying errors.
//!
//! ## Crate Policy
//!
//! - Depends only on `otcc-core` internally.
//! - A catalog that loads is valid: every control has keywords and required
//!   evidence, and ids are unique.

pub mod catalog;
pub mod control;
pub mod error;
pub mod parser;

pub use catalog::{CatalogFile, ControlCatalog};
pub use control::Control;
pub use error::{CatalogError, CatalogResult};
