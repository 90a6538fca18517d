//! # Document Classification
//!
//! Defines [`DocumentType`], the fixed taxonomy of compliance documents, and
//! [`AnalyzedDocument`], the immutable record kept for every document the
//! assessor has read.
//!
//! Document type matters to scoring: evidence drawn from several distinct
//! known types (a policy *and* a procedure *and* a diagram) is stronger than
//! the same amount of evidence from one type. `Unknown` never counts toward
//! that diversity.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The kind of compliance document a file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A governing policy statement.
    Policy,
    /// An operational procedure or process description.
    Procedure,
    /// A standard or guideline.
    Standard,
    /// A network or architecture diagram.
    Diagram,
    /// A report or log extract.
    Report,
    /// Type could not be determined.
    Unknown,
}

impl DocumentType {
    /// Returns all document types in canonical order.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::Policy,
            Self::Procedure,
            Self::Standard,
            Self::Diagram,
            Self::Report,
            Self::Unknown,
        ]
    }

    /// Returns the snake_case string identifier for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Procedure => "procedure",
            Self::Standard => "standard",
            Self::Diagram => "diagram",
            Self::Report => "report",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this type counts toward evidence diversity.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Guess the document type from a file name.
    ///
    /// Case-insensitive; the first matching rule wins:
    ///
    /// | Name contains | Type |
    /// |---|---|
    /// | `policy`, `policies` | Policy |
    /// | `procedure`, `process` | Procedure |
    /// | `standard`, `guideline` | Standard |
    /// | `diagram`, `architecture` | Diagram |
    /// | `log`, `report` | Report |
    pub fn guess_from_file_name(file_name: &str) -> Self {
        const RULES: &[(&[&str], DocumentType)] = &[
            (&["policy", "policies"], DocumentType::Policy),
            (&["procedure", "process"], DocumentType::Procedure),
            (&["standard", "guideline"], DocumentType::Standard),
            (&["diagram", "architecture"], DocumentType::Diagram),
            (&["log", "report"], DocumentType::Report),
        ];

        let lower = file_name.to_lowercase();
        RULES
            .iter()
            .find(|(terms, _)| terms.iter().any(|t| lower.contains(t)))
            .map(|(_, ty)| *ty)
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document that has been read and scanned.
///
/// Created once per document; the session keeps these in analysis order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    /// Path as supplied by the caller.
    pub file_path: String,
    /// Final path component.
    pub file_name: String,
    /// Classified document type.
    pub document_type: DocumentType,
    /// Length of the extracted text in characters.
    pub text_length: usize,
}

impl AnalyzedDocument {
    /// Build a record for `file_path`, deriving the file name from the path.
    pub fn new(file_path: impl Into<String>, document_type: DocumentType, text: &str) -> Self {
        let file_path = file_path.into();
        let file_name = Path::new(&file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.clone());
        Self {
            file_path,
            file_name,
            document_type,
            text_length: text.chars().count(),
        }
    }
}
