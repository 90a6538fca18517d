//! # Control Definitions
//!
//! A [`Control`] is one cybersecurity requirement: where it sits in the
//! framework (domain, subdomain), what it asks for (description), which
//! phrases indicate it is being addressed (keywords), and which artifacts
//! substantiate it (required evidence).
//!
//! Controls are immutable once the catalog is loaded.

use serde::{Deserialize, Serialize};

use otcc_core::{ControlId, ValidationError};

/// A single control definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Hierarchical identifier, e.g. `2-11-1`.
    pub control_id: ControlId,
    /// Top-level framework domain, e.g. "Cybersecurity Defense".
    pub domain: String,
    /// Subdomain within the domain.
    pub subdomain: String,
    /// What the control requires.
    pub description: String,
    /// Literal phrases searched for in documents. Order is scan order.
    pub keywords: Vec<String>,
    /// Artifacts expected to substantiate the control. Order is report order.
    pub required_evidence: Vec<String>,
}

impl Control {
    /// Build and validate a control.
    ///
    /// # Errors
    ///
    /// See [`Control::validate`].
    pub fn new(
        control_id: ControlId,
        domain: impl Into<String>,
        subdomain: impl Into<String>,
        description: impl Into<String>,
        keywords: Vec<String>,
        required_evidence: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let control = Self {
            control_id,
            domain: domain.into(),
            subdomain: subdomain.into(),
            description: description.into(),
            keywords,
            required_evidence,
        };
        control.validate()?;
        Ok(control)
    }

    /// Check the structural invariants of a control.
    ///
    /// Domain and description must be non-blank; keyword and required
    /// evidence lists must be non-empty and contain no blank entries. A blank
    /// keyword would match every position in every document.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let id = || self.control_id.to_string();

        if self.domain.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                control_id: id(),
                field: "domain",
            });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                control_id: id(),
                field: "description",
            });
        }
        if self.keywords.is_empty() {
            return Err(ValidationError::EmptyKeywords { control_id: id() });
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::BlankTerm {
                control_id: id(),
                field: "keywords",
            });
        }
        if self.required_evidence.is_empty() {
            return Err(ValidationError::EmptyRequiredEvidence { control_id: id() });
        }
        if self.required_evidence.iter().any(|t| t.trim().is_empty()) {
            return Err(ValidationError::BlankTerm {
                control_id: id(),
                field: "required_evidence",
            });
        }
        Ok(())
    }
}
