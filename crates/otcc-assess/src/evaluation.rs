//! # Compliance Status & Evidence Strength
//!
//! Turns a control's accumulated evidence into a [`ControlAssessment`].
//!
//! ## Evidence Strength
//!
//! ```text
//! strength = 0.4 × avg_confidence
//!          + 0.3 × type_diversity      (distinct known document types / 3, capped at 1)
//!          + 0.3 × required_coverage   (required terms seen in any context / total)
//! ```
//!
//! ## Classification
//!
//! | Strength | Status | Confidence |
//! |---|---|---|
//! | no evidence | NonCompliant | 0.9 |
//! | `>= 0.7` | Compliant | `min(0.9, strength)` |
//! | `>= 0.3` | Partial | 0.7 |
//! | `< 0.3` | NonCompliant | 0.8 |
//!
//! Boundary values belong to the upper band. The thresholds and fixed
//! confidences are policy constants.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use otcc_catalog::Control;
use otcc_core::{ControlId, DocumentType};

use crate::evidence::EvidenceItem;

/// Minimum strength for `Compliant`.
pub const COMPLIANT_THRESHOLD: f64 = 0.7;
/// Minimum strength for `Partial`.
pub const PARTIAL_THRESHOLD: f64 = 0.3;

const CONFIDENCE_WEIGHT: f64 = 0.4;
const DIVERSITY_WEIGHT: f64 = 0.3;
const COVERAGE_WEIGHT: f64 = 0.3;

/// Distinct known document types needed for full diversity credit.
const DIVERSITY_TARGET: f64 = 3.0;

const ABSENT_CONFIDENCE: f64 = 0.9;
const COMPLIANT_CONFIDENCE_CAP: f64 = 0.9;
const PARTIAL_CONFIDENCE: f64 = 0.7;
const WEAK_CONFIDENCE: f64 = 0.8;

// ---------------------------------------------------------------------------
// ComplianceStatus
// ---------------------------------------------------------------------------

/// Compliance classification of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Evidence strength at or above 0.7.
    Compliant,
    /// Evidence strength in `[0.3, 0.7)`.
    Partial,
    /// No evidence, or strength below 0.3.
    #[serde(rename = "Non-compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Display label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Partial => "Partial",
            Self::NonCompliant => "Non-compliant",
        }
    }

    /// Numeric credit used by the aggregators.
    pub fn score(&self) -> f64 {
        match self {
            Self::Compliant => 1.0,
            Self::Partial => 0.5,
            Self::NonCompliant => 0.0,
        }
    }

    /// Whether this status calls for a recommendation.
    pub fn needs_remediation(&self) -> bool {
        !matches!(self, Self::Compliant)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ControlAssessment
// ---------------------------------------------------------------------------

/// The assessment of one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlAssessment {
    /// The assessed control.
    pub control_id: ControlId,
    /// Control domain, copied from the catalog.
    pub domain: String,
    /// Control subdomain, copied from the catalog.
    pub subdomain: String,
    /// Control description, copied from the catalog.
    pub description: String,
    /// Classified status.
    pub status: ComplianceStatus,
    /// Confidence in the status, in `[0, 1]`.
    pub confidence: f64,
    /// Aggregate evidence strength, in `[0, 1]`.
    pub evidence_strength: f64,
    /// Number of evidence items.
    pub evidence_count: usize,
    /// The control's evidence, in store order.
    pub evidence_items: Vec<EvidenceItem>,
}

// ---------------------------------------------------------------------------
// Strength evaluation
// ---------------------------------------------------------------------------

/// Combine the three strength factors with the fixed weights.
///
/// All inputs are expected in `[0, 1]`; so is the output.
pub fn weighted_strength(avg_confidence: f64, type_diversity: f64, required_coverage: f64) -> f64 {
    avg_confidence * CONFIDENCE_WEIGHT
        + type_diversity * DIVERSITY_WEIGHT
        + required_coverage * COVERAGE_WEIGHT
}

/// Required evidence terms of `control` that appear in at least one item's
/// context (case-insensitive), in catalog order.
pub fn covered_requirements<'c>(items: &[EvidenceItem], control: &'c Control) -> Vec<&'c str> {
    let contexts: Vec<String> = items.iter().map(|i| i.context.to_lowercase()).collect();
    control
        .required_evidence
        .iter()
        .filter(|term| {
            let term = term.to_lowercase();
            contexts.iter().any(|ctx| ctx.contains(&term))
        })
        .map(String::as_str)
        .collect()
}

/// Required evidence terms of `control` absent from every item's context,
/// in catalog order.
pub fn missing_requirements<'c>(items: &[EvidenceItem], control: &'c Control) -> Vec<&'c str> {
    let covered = covered_requirements(items, control);
    control
        .required_evidence
        .iter()
        .map(String::as_str)
        .filter(|term| !covered.contains(term))
        .collect()
}

/// Aggregate strength of a control's evidence, in `[0, 1]`.
///
/// Returns 0 for an empty evidence list.
pub fn evaluate_strength(items: &[EvidenceItem], control: &Control) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let avg_confidence = items.iter().map(|i| i.confidence).sum::<f64>() / items.len() as f64;

    let known_types: HashSet<DocumentType> = items
        .iter()
        .map(|i| i.document_type)
        .filter(DocumentType::is_known)
        .collect();
    let type_diversity = (known_types.len() as f64 / DIVERSITY_TARGET).min(1.0);

    let required_total = control.required_evidence.len();
    let required_coverage = if required_total == 0 {
        0.0
    } else {
        covered_requirements(items, control).len() as f64 / required_total as f64
    };

    weighted_strength(avg_confidence, type_diversity, required_coverage)
}

/// Map an evidence strength to `(status, confidence)`.
pub fn classify(strength: f64) -> (ComplianceStatus, f64) {
    if strength >= COMPLIANT_THRESHOLD {
        (ComplianceStatus::Compliant, strength.min(COMPLIANT_CONFIDENCE_CAP))
    } else if strength >= PARTIAL_THRESHOLD {
        (ComplianceStatus::Partial, PARTIAL_CONFIDENCE)
    } else {
        (ComplianceStatus::NonCompliant, WEAK_CONFIDENCE)
    }
}

/// Assess one control from its accumulated evidence.
pub fn assess(control: &Control, items: &[EvidenceItem]) -> ControlAssessment {
    let (status, confidence, evidence_strength) = if items.is_empty() {
        (ComplianceStatus::NonCompliant, ABSENT_CONFIDENCE, 0.0)
    } else {
        let strength = evaluate_strength(items, control);
        let (status, confidence) = classify(strength);
        (status, confidence, strength)
    };

    tracing::debug!(
        control_id = %control.control_id,
        evidence = items.len(),
        strength = evidence_strength,
        status = %status,
        "assessed control"
    );

    ControlAssessment {
        control_id: control.control_id.clone(),
        domain: control.domain.clone(),
        subdomain: control.subdomain.clone(),
        description: control.description.clone(),
        status,
        confidence,
        evidence_strength,
        evidence_count: items.len(),
        evidence_items: items.to_vec(),
    }
}
