use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpile_core::{ProductId, WarehouseId};

/// Stock-health classification of a single product.
///
/// The three bands are mutually exclusive and exhaustive for any
/// `current_stock >= 0`: every product falls into exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockHealth {
    /// `current_stock > min_stock`.
    InStock,
    /// `0 < current_stock <= min_stock`.
    LowStock,
    /// `current_stock == 0`.
    OutOfStock,
}

impl StockHealth {
    /// Classify a quantity against a reorder threshold.
    pub fn classify(current_stock: i64, min_stock: i64) -> Self {
        if current_stock == 0 {
            StockHealth::OutOfStock
        } else if current_stock <= min_stock {
            StockHealth::LowStock
        } else {
            StockHealth::InStock
        }
    }
}

/// A warehouse-stored product as the Product Store holds it.
///
/// The ledger has read access plus quantity mutation through
/// [`crate::ProductStore::atomic_adjust`]; it is the only writer of
/// `current_stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit_of_measure: String,
    /// Quantity on hand; `>= 0` at every observable rest state.
    pub current_stock: i64,
    /// Reorder threshold; defaults to 0 (never low, only out).
    pub min_stock: i64,
    /// Inactive products are excluded from aggregate statistics.
    pub is_active: bool,
    pub warehouse_id: WarehouseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn stock_health(&self) -> StockHealth {
        StockHealth::classify(self.current_stock, self.min_stock)
    }

    /// Snapshot with an explicit (post-movement) quantity, for notifications.
    pub fn snapshot_with_stock(&self, current_stock: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            sku: self.sku.clone(),
            name: self.name.clone(),
            current_stock,
            min_stock: self.min_stock,
            warehouse_id: self.warehouse_id,
        }
    }
}

/// Point-in-time view of a product carried on notification events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub warehouse_id: WarehouseId,
}

/// Storage-location reference joined onto low/out-of-stock listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseRef {
    pub id: WarehouseId,
    pub name: String,
    pub code: String,
}

/// A product joined with its storage location, as returned by the
/// low/out-of-stock aggregation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithLocation {
    pub product: Product,
    /// `None` when the product references a warehouse the store no longer
    /// knows about; the product itself is still reported.
    pub warehouse: Option<WarehouseRef>,
}
