use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpile_core::{MovementId, ProductId};

/// What kind of movement occurred.
///
/// A closed set of variants, each carrying only the fields that make sense
/// for it; there is no catch-all record with optional everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MovementKind {
    /// Inbound goods from a supplier.
    Receipt { supplier: String },
    /// Outbound goods to a customer.
    Delivery { customer: String },
    /// Manual correction (cycle count, damage, shrinkage).
    Adjustment { reason: String },
    /// Relocation between storage locations.
    Transfer {
        from_location: String,
        to_location: String,
    },
}

/// Caller-supplied context recorded alongside a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementMetadata {
    pub kind: MovementKind,
    /// Source document reference (e.g. "RCP-001").
    pub reference: String,
    pub notes: Option<String>,
}

impl MovementMetadata {
    pub fn new(kind: MovementKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A movement handed to the log for persistence.
///
/// `id` and `sequence` are assigned by the log on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub product_id: ProductId,
    pub quantity_delta: i64,
    pub metadata: MovementMetadata,
    pub resulting_stock: i64,
    pub recorded_at: DateTime<Utc>,
}

/// Immutable audit record of one applied quantity change.
///
/// For any one product, records chain arithmetically: each record's
/// `resulting_stock` equals the prior record's `resulting_stock` plus this
/// record's `quantity_delta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: MovementId,
    /// Log-assigned insertion order (1-based, log-wide).
    pub sequence: u64,
    pub product_id: ProductId,
    /// Signed; positive = inbound, negative = outbound.
    pub quantity_delta: i64,
    pub metadata: MovementMetadata,
    /// The product's quantity immediately after this movement.
    pub resulting_stock: i64,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tag shape is the wire contract the API layer serializes; pin it.
    #[test]
    fn movement_kind_serializes_with_lowercase_type_tag() {
        let kind = MovementKind::Receipt {
            supplier: "Steel Corp Ltd".to_string(),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "receipt");
        assert_eq!(json["supplier"], "Steel Corp Ltd");

        let kind = MovementKind::Transfer {
            from_location: "Main Warehouse".to_string(),
            to_location: "Overflow".to_string(),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["from_location"], "Main Warehouse");
    }

    #[test]
    fn metadata_builder_sets_notes() {
        let metadata = MovementMetadata::new(
            MovementKind::Adjustment {
                reason: "cycle count".to_string(),
            },
            "ADJ-042",
        )
        .with_notes("counted by night shift");

        assert_eq!(metadata.reference, "ADJ-042");
        assert_eq!(metadata.notes.as_deref(), Some("counted by night shift"));
    }
}
