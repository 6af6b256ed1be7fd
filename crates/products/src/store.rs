//! The Product Store collaborator surface.

use std::sync::Arc;

use thiserror::Error;

use stockpile_core::{ProductId, WarehouseId, WriteStatus};

use crate::product::{Product, StockHealth, WarehouseRef};

/// Failure modes of the Product Store primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductStoreError {
    /// No product matches the given id.
    #[error("product not found")]
    NotFound,

    /// A conditional adjust would drive stock negative.
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: u64 },

    /// The backing store failed; `status` tells whether the write landed.
    #[error("store backend fault: {message}")]
    Backend { status: WriteStatus, message: String },
}

impl ProductStoreError {
    pub fn backend(status: WriteStatus, msg: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: msg.into(),
        }
    }
}

/// Predicate for [`ProductStore::find_many`].
///
/// Closed over the fields aggregation reads filter on: activity and the
/// stock-health band (which encodes `current_stock <= min_stock` and
/// `current_stock == 0` comparisons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub active_only: bool,
    pub health: Option<StockHealth>,
}

impl ProductFilter {
    /// All active products.
    pub fn active() -> Self {
        Self {
            active_only: true,
            health: None,
        }
    }

    pub fn with_health(mut self, health: StockHealth) -> Self {
        self.health = Some(health);
        self
    }

    /// Evaluate the predicate against one product.
    pub fn matches(&self, product: &Product) -> bool {
        if self.active_only && !product.is_active {
            return false;
        }
        match self.health {
            Some(health) => product.stock_health() == health,
            None => true,
        }
    }
}

/// Product Store collaborator: read access plus the single quantity-mutation
/// primitive the ledger is allowed to use.
pub trait ProductStore: Send + Sync {
    /// Fetch one product by id.
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError>;

    /// List products matching the predicate. Zero matches is an empty list,
    /// not an error.
    fn find_many(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductStoreError>;

    /// Conditionally apply `delta` to the product's quantity.
    ///
    /// The check-and-update must be atomic with respect to concurrent calls
    /// for the same product: the store rejects with `InsufficientStock` if
    /// the quantity at write time cannot absorb a negative delta. Returns
    /// the new quantity.
    fn atomic_adjust(&self, id: ProductId, delta: i64) -> Result<i64, ProductStoreError>;

    /// Resolve a storage-location reference for listing joins.
    fn warehouse_ref(&self, id: WarehouseId) -> Result<Option<WarehouseRef>, ProductStoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError> {
        (**self).find_by_id(id)
    }

    fn find_many(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductStoreError> {
        (**self).find_many(filter)
    }

    fn atomic_adjust(&self, id: ProductId, delta: i64) -> Result<i64, ProductStoreError> {
        (**self).atomic_adjust(id, delta)
    }

    fn warehouse_ref(&self, id: WarehouseId) -> Result<Option<WarehouseRef>, ProductStoreError> {
        (**self).warehouse_ref(id)
    }
}
