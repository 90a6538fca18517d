//! # Evidence Store
//!
//! Accumulates evidence items across every analyzed document, one list per
//! control. Lists are created for every catalog control up front, so a
//! control with no matches still has an (empty) list and is never dropped
//! from assessment.
//!
//! Lists are append-only. Within a list, items keep scan order; across
//! documents, order follows analysis order.

use std::collections::HashMap;

use otcc_catalog::ControlCatalog;
use otcc_core::ControlId;

use crate::evidence::EvidenceItem;

/// Per-control evidence lists for one assessment session.
#[derive(Debug, Clone, Default)]
pub struct EvidenceStore {
    lists: HashMap<ControlId, Vec<EvidenceItem>>,
}

impl EvidenceStore {
    /// Create a store with one empty list per catalog control.
    pub fn for_catalog(catalog: &ControlCatalog) -> Self {
        let lists = catalog
            .iter()
            .map(|c| (c.control_id.clone(), Vec::new()))
            .collect();
        Self { lists }
    }

    /// Append items to a control's list.
    ///
    /// Items for a control outside the catalog are dropped with a warning.
    pub fn extend(&mut self, control_id: &ControlId, items: Vec<EvidenceItem>) {
        match self.lists.get_mut(control_id) {
            Some(list) => list.extend(items),
            None => {
                tracing::warn!(
                    control_id = %control_id,
                    dropped = items.len(),
                    "evidence for control not in catalog"
                );
            }
        }
    }

    /// The evidence list for a control; empty if the control is unknown.
    pub fn items(&self, control_id: &ControlId) -> &[EvidenceItem] {
        self.lists.get(control_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of items recorded for a control.
    pub fn count(&self, control_id: &ControlId) -> usize {
        self.items(control_id).len()
    }

    /// Total items across all controls.
    pub fn total_items(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}
