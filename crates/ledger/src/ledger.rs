use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpile_core::{LedgerError, LedgerResult, ProductId};
use stockpile_events::{EventBus, InMemoryEventBus, LowStockReached, StockChanged, StockEvent};
use stockpile_products::{
    Product, ProductFilter, ProductStore, ProductStoreError, ProductWithLocation, StockHealth,
};

use crate::batch::{BatchItemResult, BatchUpdate};
use crate::log::{MovementLog, MovementLogError};
use crate::movement::{MovementMetadata, MovementRecord, NewMovement};

/// Result of one successfully applied movement.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMovement {
    pub new_stock: i64,
    pub movement: MovementRecord,
}

/// Stock-health counts over all active products.
///
/// The three buckets are mutually exclusive and exhaustive:
/// `in_stock + low_stock + out_of_stock == total_products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevels {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// The stock ledger: sole writer of product quantities.
///
/// Every quantity change goes through [`StockLedger::apply_movement`], which
/// validates the delta, applies it through the store's conditional-adjust
/// primitive, and appends the audit record — all under a per-product lock so
/// concurrent callers against the same product serialize while different
/// products proceed in parallel.
///
/// Notifications are fire-and-forget: a missing or failing bus never changes
/// a movement's outcome.
pub struct StockLedger<P, L, B = InMemoryEventBus<StockEvent>> {
    store: P,
    log: L,
    bus: Option<B>,
    locks: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl<P, L> StockLedger<P, L> {
    /// Ledger without a notification sink.
    pub fn new(store: P, log: L) -> Self {
        Self {
            store,
            log,
            bus: None,
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<P, L, B> StockLedger<P, L, B>
where
    P: ProductStore,
    L: MovementLog,
    B: EventBus<StockEvent>,
{
    /// Ledger that pushes stock-changed / low-stock events to `bus`.
    pub fn with_notifications(store: P, log: L, bus: B) -> Self {
        Self {
            store,
            log,
            bus: Some(bus),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Apply one signed quantity change to a product and record it.
    ///
    /// Fails with `InvalidDelta` for a zero delta, `ProductNotFound` for an
    /// unknown product, and `InsufficientStock` (carrying available and
    /// requested quantities) when a deduction would drive stock negative.
    /// On success the product's stock and the appended movement record are
    /// updated as one unit; no caller observes one without the other.
    pub fn apply_movement(
        &self,
        product_id: ProductId,
        quantity_delta: i64,
        metadata: MovementMetadata,
    ) -> LedgerResult<AppliedMovement> {
        if quantity_delta == 0 {
            return Err(LedgerError::invalid_delta("quantity delta must be non-zero"));
        }

        // Serialize the read-validate-adjust-append sequence per product.
        let lock = self.product_lock(product_id)?;
        let _held = lock
            .lock()
            .map_err(|_| LedgerError::storage_unknown("product lock poisoned"))?;

        let product = self
            .store
            .find_by_id(product_id)
            .map_err(map_store_error)?
            .ok_or(LedgerError::ProductNotFound)?;

        // checked_add: a delta large enough to overflow i64 must fail
        // cleanly, not panic while the product lock is held.
        match product.current_stock.checked_add(quantity_delta) {
            Some(new_stock) if new_stock >= 0 => {}
            _ if quantity_delta < 0 => {
                return Err(LedgerError::insufficient_stock(
                    product.current_stock,
                    quantity_delta.unsigned_abs(),
                ));
            }
            _ => {
                return Err(LedgerError::invalid_delta(
                    "quantity delta overflows stock",
                ));
            }
        }

        let new_stock = self
            .store
            .atomic_adjust(product_id, quantity_delta)
            .map_err(map_store_error)?;

        let recorded_at = Utc::now();
        let movement = match self.log.append(NewMovement {
            product_id,
            quantity_delta,
            metadata,
            resulting_stock: new_stock,
            recorded_at,
        }) {
            Ok(movement) => movement,
            Err(err) => {
                // The stock already moved but its record did not land.
                // Compensate under the still-held lock so no stock change is
                // observable without a matching movement record.
                return Err(match self.store.atomic_adjust(product_id, -quantity_delta) {
                    Ok(_) => LedgerError::storage_not_applied(format!(
                        "movement log append failed: {err}"
                    )),
                    Err(_) => LedgerError::storage_unknown(format!(
                        "movement log append failed, compensation failed: {err}"
                    )),
                });
            }
        };

        tracing::info!(
            product_id = %product_id,
            delta = quantity_delta,
            new_stock,
            "stock movement applied"
        );

        self.notify(&product, new_stock, recorded_at);

        Ok(AppliedMovement {
            new_stock,
            movement,
        })
    }

    /// Apply a sequence of independent updates, one result slot per item.
    ///
    /// A failed item never aborts or rolls back its siblings; results come
    /// back in input order. Per-item `notes_override` replaces the shared
    /// metadata's notes for that item only.
    pub fn apply_batch(
        &self,
        updates: Vec<BatchUpdate>,
        shared_metadata: MovementMetadata,
    ) -> Vec<BatchItemResult> {
        updates
            .into_iter()
            .map(|update| {
                let BatchUpdate {
                    product_id,
                    quantity_delta,
                    notes_override,
                } = update;

                let mut metadata = shared_metadata.clone();
                if notes_override.is_some() {
                    metadata.notes = notes_override;
                }

                let outcome = self.apply_movement(product_id, quantity_delta, metadata);
                BatchItemResult {
                    product_id,
                    outcome,
                }
            })
            .collect()
    }

    /// Stock-health counts over all active products.
    pub fn stock_levels(&self) -> LedgerResult<StockLevels> {
        let products = self
            .store
            .find_many(&ProductFilter::active())
            .map_err(map_store_error)?;

        let mut levels = StockLevels {
            total_products: products.len(),
            ..StockLevels::default()
        };
        for product in &products {
            match product.stock_health() {
                StockHealth::InStock => levels.in_stock += 1,
                StockHealth::LowStock => levels.low_stock += 1,
                StockHealth::OutOfStock => levels.out_of_stock += 1,
            }
        }

        Ok(levels)
    }

    /// Active products with `0 < current_stock <= min_stock`, with location.
    pub fn low_stock_products(&self) -> LedgerResult<Vec<ProductWithLocation>> {
        self.products_with_location(StockHealth::LowStock)
    }

    /// Active products with `current_stock == 0`, with location.
    pub fn out_of_stock_products(&self) -> LedgerResult<Vec<ProductWithLocation>> {
        self.products_with_location(StockHealth::OutOfStock)
    }

    /// Audit trail for one product, most recent first.
    pub fn movement_history(&self, product_id: ProductId) -> LedgerResult<Vec<MovementRecord>> {
        let mut records = self
            .log
            .for_product(product_id)
            .map_err(map_log_error)?;
        records.reverse();
        Ok(records)
    }

    fn products_with_location(
        &self,
        health: StockHealth,
    ) -> LedgerResult<Vec<ProductWithLocation>> {
        let filter = ProductFilter::active().with_health(health);
        let products = self.store.find_many(&filter).map_err(map_store_error)?;

        products
            .into_iter()
            .map(|product| {
                let warehouse = self
                    .store
                    .warehouse_ref(product.warehouse_id)
                    .map_err(map_store_error)?;
                Ok(ProductWithLocation { product, warehouse })
            })
            .collect()
    }

    fn notify(&self, product: &Product, new_stock: i64, occurred_at: DateTime<Utc>) {
        let Some(bus) = &self.bus else {
            return;
        };

        let changed = StockEvent::StockChanged(StockChanged {
            product_id: product.id,
            new_stock,
            occurred_at,
        });
        if let Err(err) = bus.publish(changed) {
            tracing::warn!(product_id = %product.id, ?err, "dropped stock-changed notification");
        }

        // Low-stock fires only inside the low band; hitting zero is the
        // out-of-stock condition, derived separately by consumers.
        if new_stock > 0 && new_stock <= product.min_stock {
            let low = StockEvent::LowStockReached(LowStockReached {
                product: product.snapshot_with_stock(new_stock),
                occurred_at,
            });
            if let Err(err) = bus.publish(low) {
                tracing::warn!(product_id = %product.id, ?err, "dropped low-stock notification");
            }
        }
    }

    fn product_lock(&self, product_id: ProductId) -> LedgerResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LedgerError::storage_unknown("lock registry poisoned"))?;
        Ok(locks.entry(product_id).or_default().clone())
    }
}

fn map_store_error(err: ProductStoreError) -> LedgerError {
    match err {
        ProductStoreError::NotFound => LedgerError::ProductNotFound,
        ProductStoreError::InsufficientStock {
            available,
            requested,
        } => LedgerError::InsufficientStock {
            available,
            requested,
        },
        ProductStoreError::Backend { status, message } => {
            LedgerError::Storage { status, message }
        }
    }
}

fn map_log_error(err: MovementLogError) -> LedgerError {
    match err {
        MovementLogError::Backend { status, message } => {
            LedgerError::Storage { status, message }
        }
    }
}
