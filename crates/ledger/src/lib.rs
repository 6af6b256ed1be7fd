//! `stockpile-ledger` — the stock ledger core.
//!
//! The only writer of product quantities: applies signed deltas, guarantees
//! stock never goes negative, appends an immutable movement record with every
//! change, fans batches out with per-item failure isolation, and derives
//! stock-health aggregations.

pub mod batch;
pub mod ledger;
pub mod log;
pub mod movement;

pub use batch::{BatchItemResult, BatchUpdate};
pub use ledger::{AppliedMovement, StockLedger, StockLevels};
pub use log::{MovementLog, MovementLogError};
pub use movement::{MovementKind, MovementMetadata, MovementRecord, NewMovement};
