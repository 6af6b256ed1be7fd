//! Explicit store initialization.
//!
//! Seed state is passed at construction time; there is no process-wide
//! default inventory.

use stockpile_products::{Product, WarehouseRef};

/// Initial contents for an [`crate::InMemoryProductStore`].
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub warehouses: Vec<WarehouseRef>,
    pub products: Vec<Product>,
}

impl SeedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warehouse(mut self, warehouse: WarehouseRef) -> Self {
        self.warehouses.push(warehouse);
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }
}
