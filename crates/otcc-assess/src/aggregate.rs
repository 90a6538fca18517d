//! # Score Aggregation
//!
//! Rolls per-control results up into an overall percentage and one
//! percentage per domain. Both use the status credit of
//! [`ComplianceStatus::score`]: Compliant 1.0, Partial 0.5, Non-compliant 0.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::evaluation::{ComplianceStatus, ControlAssessment};

/// Compliance percentage of one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: String,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub score: f64,
}

/// Round to two decimal places, exact ties to the even neighbour.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let rounded = match (scaled - floor).partial_cmp(&0.5) {
        Some(Ordering::Less) => floor,
        Some(Ordering::Greater) => floor + 1.0,
        _ if floor % 2.0 == 0.0 => floor,
        _ => floor + 1.0,
    };
    rounded / 100.0
}

/// Overall compliance percentage across `results`.
///
/// `(compliant + 0.5 × partial) / total × 100`, rounded to two decimals.
/// Returns 0 for an empty result set.
pub fn overall_compliance(results: &[ControlAssessment]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let compliant = results
        .iter()
        .filter(|r| r.status == ComplianceStatus::Compliant)
        .count() as f64;
    let partial = results
        .iter()
        .filter(|r| r.status == ComplianceStatus::Partial)
        .count() as f64;
    round2((compliant + partial * 0.5) / results.len() as f64 * 100.0)
}

/// Per-domain compliance percentages.
///
/// Domains appear in order of first appearance in `results`; a domain with
/// no results is absent.
pub fn domain_scores(results: &[ControlAssessment]) -> Vec<DomainScore> {
    let mut buckets: Vec<(&str, Vec<f64>)> = Vec::new();
    for result in results {
        let credit = result.status.score();
        match buckets.iter_mut().find(|(d, _)| *d == result.domain) {
            Some((_, scores)) => scores.push(credit),
            None => buckets.push((result.domain.as_str(), vec![credit])),
        }
    }

    buckets
        .into_iter()
        .map(|(domain, scores)| DomainScore {
            domain: domain.to_string(),
            score: round2(scores.iter().sum::<f64>() / scores.len() as f64 * 100.0),
        })
        .collect()
}
