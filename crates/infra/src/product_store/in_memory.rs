use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use stockpile_core::{ProductId, WarehouseId, WriteStatus};
use stockpile_products::{
    Product, ProductFilter, ProductStore, ProductStoreError, WarehouseRef,
};

use crate::seed::SeedData;

/// In-memory Product Store.
///
/// Intended for tests/dev. The conditional adjust revalidates non-negativity
/// under its own write lock, so even a caller bypassing the ledger's
/// per-product serialization cannot drive stock negative.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
    warehouses: RwLock<HashMap<WarehouseId, WarehouseRef>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store initialized from explicit seed state.
    pub fn with_seed(seed: SeedData) -> Self {
        Self {
            products: RwLock::new(seed.products.into_iter().map(|p| (p.id, p)).collect()),
            warehouses: RwLock::new(seed.warehouses.into_iter().map(|w| (w.id, w)).collect()),
        }
    }

    pub fn insert_product(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }

    pub fn insert_warehouse(&self, warehouse: WarehouseRef) {
        if let Ok(mut warehouses) = self.warehouses.write() {
            warehouses.insert(warehouse.id, warehouse);
        }
    }
}

impl ProductStore for InMemoryProductStore {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError> {
        let products = self.products.read().map_err(|_| {
            ProductStoreError::backend(WriteStatus::NotApplied, "product lock poisoned")
        })?;
        Ok(products.get(&id).cloned())
    }

    fn find_many(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductStoreError> {
        let products = self.products.read().map_err(|_| {
            ProductStoreError::backend(WriteStatus::NotApplied, "product lock poisoned")
        })?;
        Ok(products.values().filter(|p| filter.matches(p)).cloned().collect())
    }

    fn atomic_adjust(&self, id: ProductId, delta: i64) -> Result<i64, ProductStoreError> {
        let mut products = self.products.write().map_err(|_| {
            ProductStoreError::backend(WriteStatus::NotApplied, "product lock poisoned")
        })?;

        let product = products.get_mut(&id).ok_or(ProductStoreError::NotFound)?;

        // Check-and-update under the write lock: the quantity read here
        // cannot go stale before the write below. checked_add keeps an
        // overflowing delta from panicking with the lock held.
        let new_stock = match product.current_stock.checked_add(delta) {
            Some(new_stock) if new_stock >= 0 => new_stock,
            _ if delta < 0 => {
                return Err(ProductStoreError::InsufficientStock {
                    available: product.current_stock,
                    requested: delta.unsigned_abs(),
                });
            }
            _ => {
                return Err(ProductStoreError::backend(
                    WriteStatus::NotApplied,
                    "quantity overflow",
                ));
            }
        };

        product.current_stock = new_stock;
        product.updated_at = Utc::now();
        tracing::debug!(product_id = %id, delta, new_stock, "stock adjusted");
        Ok(new_stock)
    }

    fn warehouse_ref(&self, id: WarehouseId) -> Result<Option<WarehouseRef>, ProductStoreError> {
        let warehouses = self.warehouses.read().map_err(|_| {
            ProductStoreError::backend(WriteStatus::NotApplied, "warehouse lock poisoned")
        })?;
        Ok(warehouses.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            sku: "CHR-001".to_string(),
            name: "Office Chairs".to_string(),
            category: "Furniture".to_string(),
            unit_of_measure: "pcs".to_string(),
            current_stock: stock,
            min_stock: 2,
            is_active: true,
            warehouse_id: WarehouseId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn adjust_rejects_overdraw_under_the_write_lock() {
        let store = InMemoryProductStore::new();
        let p = product(5);
        let id = p.id;
        store.insert_product(p);

        let err = store.atomic_adjust(id, -6).unwrap_err();
        assert_eq!(
            err,
            ProductStoreError::InsufficientStock {
                available: 5,
                requested: 6
            }
        );
        assert_eq!(store.find_by_id(id).unwrap().unwrap().current_stock, 5);
    }

    #[test]
    fn adjust_returns_the_new_quantity() {
        let store = InMemoryProductStore::new();
        let p = product(5);
        let id = p.id;
        store.insert_product(p);

        assert_eq!(store.atomic_adjust(id, 7).unwrap(), 12);
        assert_eq!(store.atomic_adjust(id, -12).unwrap(), 0);
    }

    #[test]
    fn adjust_rejects_quantity_overflow() {
        let store = InMemoryProductStore::new();
        let p = product(1);
        let id = p.id;
        store.insert_product(p);

        let err = store.atomic_adjust(id, i64::MAX).unwrap_err();
        assert!(matches!(
            err,
            ProductStoreError::Backend {
                status: WriteStatus::NotApplied,
                ..
            }
        ));
        assert_eq!(store.find_by_id(id).unwrap().unwrap().current_stock, 1);
    }

    #[test]
    fn adjust_unknown_product_is_not_found() {
        let store = InMemoryProductStore::new();
        assert_eq!(
            store.atomic_adjust(ProductId::new(), 1).unwrap_err(),
            ProductStoreError::NotFound
        );
    }

    #[test]
    fn seeded_state_is_visible() {
        let wh = WarehouseRef {
            id: WarehouseId::new(),
            name: "Main Warehouse".to_string(),
            code: "WH-MAIN".to_string(),
        };
        let p = product(3);
        let (wh_id, p_id) = (wh.id, p.id);

        let store = InMemoryProductStore::with_seed(SeedData::new().warehouse(wh).product(p));

        assert!(store.find_by_id(p_id).unwrap().is_some());
        assert_eq!(store.warehouse_ref(wh_id).unwrap().unwrap().code, "WH-MAIN");
    }
}
