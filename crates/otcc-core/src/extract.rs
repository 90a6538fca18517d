//! # Text Extraction Seam
//!
//! The assessor scores plain text. Turning a file into text is the job of a
//! [`TextExtractor`] implementation supplied by the caller; the concrete file
//! readers live in `otcc-extract` so the scoring crates stay free of PDF and
//! ZIP dependencies.

use std::path::Path;

use crate::error::ExtractError;

/// File formats the assessor accepts, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.pdf`
    Pdf,
    /// `.docx` or `.doc`
    Word,
    /// `.txt` or `.md`
    PlainText,
}

impl DocumentFormat {
    /// Supported extensions, lower-case, without the dot.
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["pdf", "docx", "doc", "txt", "md"];

    /// Classify a path by its extension (case-insensitive).
    ///
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = extension_of(path);
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Word),
            "txt" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Lower-cased extension of `path`, or the empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Produces the plain text of a document.
///
/// Implementations should return [`ExtractError::UnsupportedFormat`] for
/// files they cannot read at all, and another variant when a supported file
/// turns out to be unreadable. The session distinguishes the two: the first
/// skips the document, the second analyzes it as empty text.
pub trait TextExtractor {
    /// Extract the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        (**self).extract_text(path)
    }
}
