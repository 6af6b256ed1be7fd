//! `stockpile-core` — shared foundation for the stock ledger.
//!
//! Strongly-typed identifiers and the error taxonomy; no IO, no collaborators.

pub mod error;
pub mod id;

pub use error::{LedgerError, LedgerResult, WriteStatus};
pub use id::{MovementId, ProductId, WarehouseId};
