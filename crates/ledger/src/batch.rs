use serde::{Deserialize, Serialize};

use stockpile_core::{LedgerError, ProductId};

use crate::ledger::AppliedMovement;

/// One requested quantity change inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub product_id: ProductId,
    pub quantity_delta: i64,
    /// Replaces the shared metadata's notes for this item when present.
    pub notes_override: Option<String>,
}

impl BatchUpdate {
    pub fn new(product_id: ProductId, quantity_delta: i64) -> Self {
        Self {
            product_id,
            quantity_delta,
            notes_override: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes_override = Some(notes.into());
        self
    }
}

/// Outcome of one batch item.
///
/// Batch isolation is structural: every item gets exactly one slot carrying
/// either its applied movement or its own error, and sibling failures never
/// leak across slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItemResult {
    pub product_id: ProductId,
    pub outcome: Result<AppliedMovement, LedgerError>,
}

impl BatchItemResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
