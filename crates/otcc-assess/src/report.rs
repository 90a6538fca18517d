//! # Assessment Reports
//!
//! Two serialized views of a finished assessment:
//!
//! - [`AssessmentReport`] — the summary consumed by the dashboard
//!   (`results.json`, camelCase keys).
//! - [`DetailedExport`] — the full per-control record including every
//!   evidence item (`assessment_details.json`), with a SHA-256 digest over
//!   the control results so two runs can be compared for audit.

use std::fmt;

use serde::{Deserialize, Serialize};

use otcc_core::{sha256_hex, AnalyzedDocument, ControlId};

use crate::aggregate::DomainScore;
use crate::error::AssessResult;
use crate::evaluation::ControlAssessment;
use crate::recommendation::{Priority, Recommendation};

/// Overall scores below this percentage are labelled Non-Compliant.
pub const NON_COMPLIANT_BELOW: f64 = 50.0;

/// Effort placeholder attached to every report recommendation.
pub const DEFAULT_EFFORT: &str = "Medium";

/// Top-level compliance label of a report.
///
/// There is no "Compliant" label: a perfect score still reads
/// "Partially Compliant".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLabel {
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
}

impl ComplianceLabel {
    pub fn from_score(overall: f64) -> Self {
        if overall < NON_COMPLIANT_BELOW {
            Self::NonCompliant
        } else {
            Self::PartiallyCompliant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonCompliant => "Non-Compliant",
            Self::PartiallyCompliant => "Partially Compliant",
        }
    }
}

impl fmt::Display for ComplianceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding: a control that needs remediation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub control_id: ControlId,
    pub domain: String,
    pub subdomain: String,
    /// The recommendation's one-line action.
    pub issue: String,
    pub impact: Priority,
    /// The recommendation's details.
    pub recommendation: String,
}

/// Dashboard form of a [`Recommendation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecommendation {
    pub title: String,
    pub impact: Priority,
    pub effort: String,
    pub description: String,
    pub compliance_improvement: u32,
}

impl From<&Recommendation> for ReportRecommendation {
    fn from(rec: &Recommendation) -> Self {
        Self {
            title: rec.title().to_string(),
            impact: rec.priority,
            effort: DEFAULT_EFFORT.to_string(),
            description: rec.details.clone(),
            compliance_improvement: rec.compliance_improvement(),
        }
    }
}

/// Summary report written as `results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub overall_score: f64,
    pub domain_scores: Vec<DomainScore>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<ReportRecommendation>,
    pub controls_assessed: usize,
    pub documents_analyzed: usize,
    pub compliance_status: ComplianceLabel,
    /// `YYYY-MM-DD`.
    pub assessment_date: String,
    pub assessment_id: String,
}

/// Inputs for [`AssessmentReport::build`].
#[derive(Debug)]
pub struct ReportInputs<'a> {
    pub assessment_id: &'a str,
    pub assessment_date: &'a str,
    pub overall_score: f64,
    pub domain_scores: Vec<DomainScore>,
    pub results: &'a [ControlAssessment],
    pub recommendations: &'a [Recommendation],
    pub controls_assessed: usize,
    pub documents_analyzed: usize,
}

impl AssessmentReport {
    /// Assemble the report; findings and recommendations follow the order
    /// of `recommendations`.
    pub fn build(inputs: ReportInputs<'_>) -> Self {
        let findings = inputs
            .recommendations
            .iter()
            .map(|rec| {
                let result = inputs.results.iter().find(|r| r.control_id == rec.control_id);
                Finding {
                    control_id: rec.control_id.clone(),
                    domain: result.map(|r| r.domain.clone()).unwrap_or_default(),
                    subdomain: result.map(|r| r.subdomain.clone()).unwrap_or_default(),
                    issue: rec.recommendation.clone(),
                    impact: rec.priority,
                    recommendation: rec.details.clone(),
                }
            })
            .collect();

        Self {
            overall_score: inputs.overall_score,
            domain_scores: inputs.domain_scores,
            findings,
            recommendations: inputs.recommendations.iter().map(ReportRecommendation::from).collect(),
            controls_assessed: inputs.controls_assessed,
            documents_analyzed: inputs.documents_analyzed,
            compliance_status: ComplianceLabel::from_score(inputs.overall_score),
            assessment_date: inputs.assessment_date.to_string(),
            assessment_id: inputs.assessment_id.to_string(),
        }
    }
}

/// Full assessment record written as `assessment_details.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedExport {
    pub overall_compliance: f64,
    pub assessment_date: String,
    pub controls_assessed: usize,
    pub documents_analyzed: usize,
    pub control_results: Vec<ControlAssessment>,
    pub recommendations: Vec<Recommendation>,
    pub documents: Vec<AnalyzedDocument>,
    /// Hex SHA-256 of the JSON-serialized `control_results`.
    pub results_digest: String,
}

impl DetailedExport {
    pub fn new(
        overall_compliance: f64,
        assessment_date: String,
        control_results: Vec<ControlAssessment>,
        recommendations: Vec<Recommendation>,
        documents: Vec<AnalyzedDocument>,
    ) -> AssessResult<Self> {
        let results_digest = results_digest(&control_results)?;
        Ok(Self {
            overall_compliance,
            assessment_date,
            controls_assessed: control_results.len(),
            documents_analyzed: documents.len(),
            control_results,
            recommendations,
            documents,
            results_digest,
        })
    }
}

/// Hex SHA-256 over the JSON serialization of `results`.
pub fn results_digest(results: &[ControlAssessment]) -> AssessResult<String> {
    let bytes = serde_json::to_vec(results)?;
    Ok(sha256_hex(&bytes))
}
