use std::sync::RwLock;

use stockpile_core::{MovementId, ProductId, WriteStatus};
use stockpile_ledger::{MovementLog, MovementLogError, MovementRecord, NewMovement};

/// In-memory append-only movement log.
///
/// Intended for tests/dev. Records are never updated or deleted; sequence
/// numbers are 1-based insertion order across the whole log.
#[derive(Debug, Default)]
pub struct InMemoryMovementLog {
    records: RwLock<Vec<MovementRecord>>,
}

impl InMemoryMovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records ever appended.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records in insertion order.
    pub fn all(&self) -> Vec<MovementRecord> {
        self.records.read().map(|r| r.clone()).unwrap_or_default()
    }
}

impl MovementLog for InMemoryMovementLog {
    fn append(&self, movement: NewMovement) -> Result<MovementRecord, MovementLogError> {
        let mut records = self.records.write().map_err(|_| {
            MovementLogError::backend(WriteStatus::NotApplied, "log lock poisoned")
        })?;

        let record = MovementRecord {
            id: MovementId::new(),
            sequence: records.len() as u64 + 1,
            product_id: movement.product_id,
            quantity_delta: movement.quantity_delta,
            metadata: movement.metadata,
            resulting_stock: movement.resulting_stock,
            recorded_at: movement.recorded_at,
        };
        records.push(record.clone());
        tracing::debug!(
            movement_id = %record.id,
            product_id = %record.product_id,
            sequence = record.sequence,
            "movement appended"
        );
        Ok(record)
    }

    fn for_product(&self, product_id: ProductId) -> Result<Vec<MovementRecord>, MovementLogError> {
        let records = self.records.read().map_err(|_| {
            MovementLogError::backend(WriteStatus::NotApplied, "log lock poisoned")
        })?;
        Ok(records
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockpile_ledger::{MovementKind, MovementMetadata};

    fn new_movement(product_id: ProductId, delta: i64, resulting: i64) -> NewMovement {
        NewMovement {
            product_id,
            quantity_delta: delta,
            metadata: MovementMetadata::new(
                MovementKind::Adjustment {
                    reason: "cycle count".to_string(),
                },
                "ADJ-001",
            ),
            resulting_stock: resulting,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn append_assigns_monotonic_sequences() {
        let log = InMemoryMovementLog::new();
        let product_id = ProductId::new();

        let first = log.append(new_movement(product_id, 5, 5)).unwrap();
        let second = log.append(new_movement(product_id, -2, 3)).unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn for_product_filters_and_keeps_insertion_order() {
        let log = InMemoryMovementLog::new();
        let a = ProductId::new();
        let b = ProductId::new();

        log.append(new_movement(a, 5, 5)).unwrap();
        log.append(new_movement(b, 1, 1)).unwrap();
        log.append(new_movement(a, -2, 3)).unwrap();

        let records = log.for_product(a).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantity_delta, 5);
        assert_eq!(records[1].quantity_delta, -2);
    }
}
