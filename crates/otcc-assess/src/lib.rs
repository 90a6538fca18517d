//! # otcc-assess — Evidence Scoring & Assessment Engine
//!
//! Turns raw document text into a scored compliance assessment against a
//! [`ControlCatalog`](otcc_catalog::ControlCatalog):
//!
//! - **Evidence** (`evidence.rs`): literal, case-insensitive keyword
//!   matching with a context window and a per-occurrence confidence.
//!
//! - **Store** (`store.rs`): append-only evidence lists, one per control.
//!
//! - **Evaluation** (`evaluation.rs`): evidence strength and the
//!   Compliant / Partial / Non-compliant classification.
//!
//! - **Aggregate** (`aggregate.rs`): overall and per-domain percentages.
//!
//! - **Recommendation** (`recommendation.rs`): prioritized remediation text
//!   for every control that is not Compliant.
//!
//! - **Report** (`report.rs`): the summary and detailed serialized forms.
//!
//! - **Session** (`session.rs`): the per-run state tying it together.
//!
//! ## Determinism
//!
//! Given the same catalog, the same documents in the same order, and the
//! same assessment date, a session produces byte-identical reports. There
//! is no randomness and no process-wide state.

pub mod aggregate;
pub mod error;
pub mod evaluation;
pub mod evidence;
pub mod recommendation;
pub mod report;
pub mod session;
pub mod store;

pub use aggregate::{domain_scores, overall_compliance, DomainScore};
pub use error::{AssessError, AssessResult};
pub use evaluation::{assess, evaluate_strength, ComplianceStatus, ControlAssessment};
pub use evidence::{find_evidence, score_confidence, ControlMatcher, EvidenceItem};
pub use recommendation::{generate_recommendations, sort_by_priority, Priority, Recommendation};
pub use report::{AssessmentReport, ComplianceLabel, DetailedExport, Finding, ReportRecommendation};
pub use session::{AssessmentSession, DocumentOutcome};
pub use store::EvidenceStore;
