//! # Control Identifier
//!
//! `ControlId` is the validated identity of a control in the catalog. The
//! format is hierarchical, `<domain>-<section>-<item>`, with each part a
//! decimal number (e.g. `2-11-1` is domain 2, section 11, item 1).
//!
//! Validation happens at construction and on deserialization, so a catalog
//! file with a malformed id is rejected before any document is read.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated OTCC control identifier.
///
/// Serializes as its plain string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlId(String);

impl ControlId {
    /// Create a control identifier from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidControlId`] unless the input is
    /// exactly three positive decimal numbers joined by `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let parts: Vec<&str> = s.split('-').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| p.chars().all(|c| c.is_ascii_digit()) && p.chars().any(|c| c != '0'));
        if well_formed {
            Ok(())
        } else {
            Err(ValidationError::InvalidControlId(s.to_string()))
        }
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ControlId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ControlId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ControlId> for String {
    fn from(id: ControlId) -> Self {
        id.0
    }
}

impl AsRef<str> for ControlId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ControlId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ControlId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
