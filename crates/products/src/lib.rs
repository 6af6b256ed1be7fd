//! `stockpile-products` — the Product Store collaborator surface.
//!
//! Product records, stock-health classification, and the store trait the
//! ledger consumes. No storage technology lives here; implementations are
//! provided by `stockpile-infra` (or a real backend).

pub mod product;
pub mod store;

pub use product::{Product, ProductSnapshot, ProductWithLocation, StockHealth, WarehouseRef};
pub use store::{ProductFilter, ProductStore, ProductStoreError};
