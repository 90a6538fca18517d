//! # Remediation Recommendations
//!
//! Produces one recommendation per control that is not Compliant.
//!
//! - **Non-compliant**: "Implement ..." listing every required evidence
//!   term. Controls in [`HIGH_PRIORITY_CONTROLS`] are High priority with a
//!   10-15% expected improvement; the rest are Medium with 5-10%.
//! - **Partial**: "Enhance ..." at Medium priority, listing the required
//!   terms not seen in any evidence context, or asking for stronger
//!   implementation evidence when every term was seen.
//!
//! Output is stably sorted by priority, so controls of equal priority keep
//! catalog order.

use std::fmt;

use serde::{Deserialize, Serialize};

use otcc_catalog::{Control, ControlCatalog};
use otcc_core::ControlId;

use crate::evaluation::{missing_requirements, ComplianceStatus, ControlAssessment};

/// Controls whose absence is treated as High priority.
pub const HIGH_PRIORITY_CONTROLS: &[&str] = &["2-11-1", "4-1-1"];

const HIGH_IMPROVEMENT: &str = "10-15%";
const STANDARD_IMPROVEMENT: &str = "5-10%";

/// Remediation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; lower comes first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remediation recommendation for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub control_id: ControlId,
    pub priority: Priority,
    /// One-line action, e.g. "Implement ...".
    pub recommendation: String,
    /// What the documentation should add.
    pub details: String,
    /// Percentage range, e.g. "10-15%".
    pub expected_improvement: String,
}

impl Recommendation {
    /// Text of the recommendation before its first `.`.
    pub fn title(&self) -> &str {
        self.recommendation
            .split('.')
            .next()
            .unwrap_or(&self.recommendation)
    }

    /// Lower bound of the expected improvement range, as an integer.
    ///
    /// Returns 0 if the range is not of the form `N-M%`.
    pub fn compliance_improvement(&self) -> u32 {
        self.expected_improvement
            .split('-')
            .next()
            .and_then(|lower| lower.trim().trim_end_matches('%').parse().ok())
            .unwrap_or(0)
    }
}

fn is_high_priority(control_id: &ControlId) -> bool {
    HIGH_PRIORITY_CONTROLS.contains(&control_id.as_str())
}

/// Build the recommendation for one result, or `None` if it is Compliant.
pub fn recommend(control: &Control, result: &ControlAssessment) -> Option<Recommendation> {
    match result.status {
        ComplianceStatus::Compliant => None,
        ComplianceStatus::NonCompliant => {
            let high = is_high_priority(&control.control_id);
            Some(Recommendation {
                control_id: control.control_id.clone(),
                priority: if high { Priority::High } else { Priority::Medium },
                recommendation: format!("Implement {}", control.description),
                details: format!(
                    "Develop and implement {}. Documentation should include: {}.",
                    control.description,
                    control.required_evidence.join(", ")
                ),
                expected_improvement: (if high { HIGH_IMPROVEMENT } else { STANDARD_IMPROVEMENT })
                    .to_string(),
            })
        }
        ComplianceStatus::Partial => {
            let missing = missing_requirements(&result.evidence_items, control);
            let details = if missing.is_empty() {
                format!("Strengthen implementation evidence for {}.", control.description)
            } else {
                format!("Enhance existing documentation with: {}.", missing.join(", "))
            };
            Some(Recommendation {
                control_id: control.control_id.clone(),
                priority: Priority::Medium,
                recommendation: format!("Enhance {}", control.description),
                details,
                expected_improvement: STANDARD_IMPROVEMENT.to_string(),
            })
        }
    }
}

/// Recommendations for every non-Compliant result, High priority first.
///
/// Results whose control is missing from `catalog` are skipped.
pub fn generate_recommendations(
    catalog: &ControlCatalog,
    results: &[ControlAssessment],
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = results
        .iter()
        .filter_map(|result| match catalog.get(&result.control_id) {
            Some(control) => recommend(control, result),
            None => {
                tracing::warn!(control_id = %result.control_id, "result for control not in catalog");
                None
            }
        })
        .collect();
    sort_by_priority(&mut recommendations);
    recommendations
}

/// Stable sort by priority rank: High, then Medium, then Low.
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority.rank());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::assess;
    use crate::evidence::EvidenceItem;
    use otcc_core::DocumentType;

    fn catalog() -> ControlCatalog {
        ControlCatalog::embedded().unwrap()
    }

    fn result_with(
        catalog: &ControlCatalog,
        id: &str,
        status: ComplianceStatus,
        contexts: &[&str],
    ) -> ControlAssessment {
        let control = catalog.get_str(id).unwrap();
        let mut result = assess(control, &[]);
        result.status = status;
        result.evidence_items = contexts
            .iter()
            .map(|ctx| EvidenceItem {
                document: "doc.txt".to_string(),
                document_type: DocumentType::Policy,
                keyword: control.keywords[0].clone(),
                context: ctx.to_string(),
                confidence: 0.6,
            })
            .collect();
        result.evidence_count = result.evidence_items.len();
        result
    }

    #[test]
    fn compliant_controls_get_nothing() {
        let catalog = catalog();
        let results = vec![result_with(&catalog, "1-1-1", ComplianceStatus::Compliant, &[])];
        assert!(generate_recommendations(&catalog, &results).is_empty());
    }

    #[test]
    fn non_compliant_high_priority_control() {
        let catalog = catalog();
        let results = vec![result_with(&catalog, "2-11-1", ComplianceStatus::NonCompliant, &[])];
        let recs = generate_recommendations(&catalog, &results);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(
            rec.recommendation,
            "Implement Activation of cybersecurity event logs and audit trails"
        );
        assert_eq!(
            rec.details,
            "Develop and implement Activation of cybersecurity event logs and audit trails. \
             Documentation should include: logging configuration, monitoring setup, log storage policy."
        );
        assert_eq!(rec.expected_improvement, "10-15%");
        assert_eq!(rec.compliance_improvement(), 10);
    }

    #[test]
    fn non_compliant_ordinary_control_is_medium() {
        let catalog = catalog();
        let results = vec![result_with(&catalog, "2-4-1", ComplianceStatus::NonCompliant, &[])];
        let rec = &generate_recommendations(&catalog, &results)[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.expected_improvement, "5-10%");
        assert_eq!(rec.compliance_improvement(), 5);
    }

    #[test]
    fn partial_lists_missing_terms_in_catalog_order() {
        let catalog = catalog();
        let results = vec![result_with(
            &catalog,
            "1-1-3",
            ComplianceStatus::Partial,
            &["the Review Records are kept"],
        )];
        let rec = &generate_recommendations(&catalog, &results)[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(
            rec.recommendation,
            "Enhance OT/ICS cybersecurity policies reviewed periodically"
        );
        assert_eq!(
            rec.details,
            "Enhance existing documentation with: review schedule, update history."
        );
        assert_eq!(rec.expected_improvement, "5-10%");
    }

    #[test]
    fn partial_with_full_coverage_asks_for_stronger_evidence() {
        let catalog = catalog();
        let results = vec![result_with(
            &catalog,
            "1-1-3",
            ComplianceStatus::Partial,
            &["review schedule", "review records and update history"],
        )];
        let rec = &generate_recommendations(&catalog, &results)[0];
        assert_eq!(
            rec.details,
            "Strengthen implementation evidence for OT/ICS cybersecurity policies reviewed periodically."
        );
    }

    #[test]
    fn high_priority_sorts_first_and_ties_keep_order() {
        let catalog = catalog();
        let results = vec![
            result_with(&catalog, "1-1-1", ComplianceStatus::NonCompliant, &[]),
            result_with(&catalog, "1-1-3", ComplianceStatus::Partial, &[]),
            result_with(&catalog, "2-4-1", ComplianceStatus::NonCompliant, &[]),
            result_with(&catalog, "2-11-1", ComplianceStatus::NonCompliant, &[]),
            result_with(&catalog, "3-1-1", ComplianceStatus::Compliant, &[]),
            result_with(&catalog, "4-1-1", ComplianceStatus::NonCompliant, &[]),
        ];
        let recs = generate_recommendations(&catalog, &results);
        let order: Vec<&str> = recs.iter().map(|r| r.control_id.as_str()).collect();
        assert_eq!(order, vec!["2-11-1", "4-1-1", "1-1-1", "1-1-3", "2-4-1"]);
        assert!(recs.windows(2).all(|w| w[0].priority.rank() <= w[1].priority.rank()));
    }

    #[test]
    fn sort_orders_low_high_medium_as_high_medium_low() {
        let rec = |id: &str, priority| Recommendation {
            control_id: ControlId::new(id).unwrap(),
            priority,
            recommendation: format!("Implement {id}"),
            details: String::new(),
            expected_improvement: "5-10%".to_string(),
        };
        let mut recs = vec![
            rec("1-1-1", Priority::Low),
            rec("1-1-2", Priority::High),
            rec("1-1-3", Priority::Medium),
        ];
        sort_by_priority(&mut recs);
        let order: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn title_is_text_before_first_period() {
        let rec = Recommendation {
            control_id: ControlId::new("1-1-1").unwrap(),
            priority: Priority::Low,
            recommendation: "Implement v2.0 controls".to_string(),
            details: String::new(),
            expected_improvement: "bogus".to_string(),
        };
        assert_eq!(rec.title(), "Implement v2");
        assert_eq!(rec.compliance_improvement(), 0);
    }

    #[test]
    fn priority_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }
}
