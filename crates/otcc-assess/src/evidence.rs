//! # Evidence Location & Confidence Scoring
//!
//! Scans document text for every occurrence of every control keyword and
//! turns each occurrence into an [`EvidenceItem`]: the matched keyword, a
//! window of surrounding text, and a confidence score.
//!
//! ## Matching
//!
//! Keywords are matched literally (regex-escaped) and case-insensitively
//! against the full document text, finding every non-overlapping
//! occurrence. There is no stemming and no tokenization: "policy review"
//! does not match "policies reviewed".
//!
//! ## Context Window
//!
//! Up to [`CONTEXT_RADIUS`] characters before the match start and after the
//! match end, clipped to the document. Line breaks become spaces and the
//! window is trimmed.
//!
//! ## Confidence
//!
//! ```text
//! confidence = min(0.95, 0.5
//!                        + 0.1 × (other control keywords in window)
//!                        + 0.1 × (required evidence terms in window)
//!                        + 0.1 × [window uses policy language])
//! ```
//!
//! Every raw occurrence is kept. Three matches of the same keyword yield
//! three items.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use otcc_catalog::Control;
use otcc_core::{AnalyzedDocument, ControlId, DocumentType};

use crate::error::{AssessError, AssessResult};

/// Characters of context captured on each side of a match.
pub const CONTEXT_RADIUS: usize = 150;

/// Confidence of a bare keyword match.
pub const BASE_CONFIDENCE: f64 = 0.5;

/// Bonus per co-occurring signal.
pub const SIGNAL_BONUS: f64 = 0.1;

/// Upper bound on a single item's confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Words that mark normative, policy-style language.
pub const POLICY_INDICATORS: &[&str] = &["shall", "must", "required", "policy", "procedure", "standard"];

/// One keyword occurrence in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// File name of the source document.
    pub document: String,
    /// Type of the source document.
    pub document_type: DocumentType,
    /// The control keyword that matched, as written in the catalog.
    pub keyword: String,
    /// Whitespace-normalized text surrounding the match.
    pub context: String,
    /// Confidence in `[0.5, 0.95]`.
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Confidence scoring
// ---------------------------------------------------------------------------

/// Score how much a context window looks like real compliance documentation
/// for `control`, given that `keyword` matched inside it.
pub fn score_confidence(keyword: &str, context: &str, control: &Control) -> f64 {
    let lower = context.to_lowercase();

    let sibling_keywords = control
        .keywords
        .iter()
        .filter(|kw| kw.as_str() != keyword && lower.contains(&kw.to_lowercase()))
        .count();

    let evidence_terms = control
        .required_evidence
        .iter()
        .filter(|term| lower.contains(&term.to_lowercase()))
        .count();

    let mut confidence = BASE_CONFIDENCE;
    confidence += sibling_keywords as f64 * SIGNAL_BONUS;
    confidence += evidence_terms as f64 * SIGNAL_BONUS;
    if has_policy_language(&lower) {
        confidence += SIGNAL_BONUS;
    }

    confidence.min(MAX_CONFIDENCE)
}

fn has_policy_language(lower_context: &str) -> bool {
    POLICY_INDICATORS.iter().any(|w| lower_context.contains(w))
}

// ---------------------------------------------------------------------------
// Context window
// ---------------------------------------------------------------------------

/// Byte offset `radius` characters before `at`, or 0.
fn window_start(text: &str, at: usize, radius: usize) -> usize {
    if radius == 0 {
        return at;
    }
    text[..at]
        .char_indices()
        .rev()
        .nth(radius - 1)
        .map_or(0, |(i, _)| i)
}

/// Byte offset `radius` characters after `at`, or the end of `text`.
fn window_end(text: &str, at: usize, radius: usize) -> usize {
    text[at..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| at + i)
}

/// Extract the normalized context window around `text[start..end]`.
pub fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = window_start(text, start, CONTEXT_RADIUS);
    let to = window_end(text, end, CONTEXT_RADIUS);
    normalize_context(&text[from..to])
}

fn normalize_context(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ").trim().to_string()
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

/// Compiled keyword matchers for one control.
#[derive(Debug, Clone)]
pub struct ControlMatcher {
    control_id: ControlId,
    keywords: Vec<(String, Regex)>,
}

impl ControlMatcher {
    /// Compile a case-insensitive literal matcher for every keyword.
    pub fn new(control: &Control) -> AssessResult<Self> {
        let keywords = control
            .keywords
            .iter()
            .map(|kw| {
                RegexBuilder::new(&regex::escape(kw))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (kw.clone(), re))
                    .map_err(|source| AssessError::Pattern {
                        control_id: control.control_id.to_string(),
                        keyword: kw.clone(),
                        source,
                    })
            })
            .collect::<AssessResult<Vec<_>>>()?;
        Ok(Self {
            control_id: control.control_id.clone(),
            keywords,
        })
    }

    /// The control this matcher was built for.
    pub fn control_id(&self) -> &ControlId {
        &self.control_id
    }

    /// Find every keyword occurrence of `control` in `text`.
    ///
    /// Items are ordered by keyword (catalog order), then by position.
    pub fn find_evidence(
        &self,
        control: &Control,
        text: &str,
        document: &AnalyzedDocument,
    ) -> Vec<EvidenceItem> {
        let mut items = Vec::new();
        for (keyword, re) in &self.keywords {
            for m in re.find_iter(text) {
                let context = context_window(text, m.start(), m.end());
                let confidence = score_confidence(keyword, &context, control);
                items.push(EvidenceItem {
                    document: document.file_name.clone(),
                    document_type: document.document_type,
                    keyword: keyword.clone(),
                    context,
                    confidence,
                });
            }
        }
        items
    }
}

/// Find evidence for a single control without a pre-built matcher.
///
/// Convenience for one-off scans; sessions reuse [`ControlMatcher`]s.
pub fn find_evidence(
    control: &Control,
    text: &str,
    document: &AnalyzedDocument,
) -> AssessResult<Vec<EvidenceItem>> {
    Ok(ControlMatcher::new(control)?.find_evidence(control, text, document))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn control() -> Control {
        Control::new(
            ControlId::new("2-11-1").unwrap(),
            "Cybersecurity Defense",
            "Cybersecurity Event Logs and Monitoring Management",
            "Activation of cybersecurity event logs and audit trails",
            vec!["event log".into(), "audit trail".into(), "SIEM".into()],
            vec!["logging configuration".into(), "monitoring setup".into()],
        )
        .unwrap()
    }

    /// Context built from free text interleaved with signal phrases.
    fn context() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            "[a-zA-Z ,.]{0,40}",
            Just("event log".to_string()),
            Just("Audit Trail".to_string()),
            Just("siem".to_string()),
            Just("logging configuration".to_string()),
            Just("MONITORING SETUP".to_string()),
            Just("shall".to_string()),
        ];
        prop::collection::vec(piece, 0..12).prop_map(|parts| parts.join(" "))
    }

    proptest! {
        /// Confidence stays within the base and the cap.
        #[test]
        fn confidence_is_bounded(ctx in context()) {
            let c = score_confidence("event log", &ctx, &control());
            prop_assert!(c >= BASE_CONFIDENCE);
            prop_assert!(c <= MAX_CONFIDENCE);
        }

        /// Appending text never lowers confidence.
        #[test]
        fn confidence_is_monotone_in_context(ctx in context(), extra in context()) {
            let c = control();
            let before = score_confidence("event log", &ctx, &c);
            let after = score_confidence("event log", &format!("{ctx} {extra}"), &c);
            prop_assert!(after >= before);
        }

        /// Every item of a scan carries a bounded confidence and a catalog keyword.
        #[test]
        fn scan_items_are_well_formed(text in context()) {
            let c = control();
            let doc = AnalyzedDocument::new("log_report.txt", DocumentType::Report, &text);
            for item in find_evidence(&c, &text, &doc).unwrap() {
                prop_assert!(c.keywords.contains(&item.keyword));
                prop_assert!((BASE_CONFIDENCE..=MAX_CONFIDENCE).contains(&item.confidence));
            }
        }
    }
}
