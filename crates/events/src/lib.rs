//! `stockpile-events` — stock notification events and the bus abstraction.
//!
//! The ledger publishes [`StockEvent`]s here after a successful mutation;
//! delivery is best-effort and never affects the mutation outcome.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::{LowStockReached, StockChanged, StockEvent};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
