use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpile_core::ProductId;
use stockpile_products::ProductSnapshot;

/// Push-only notification emitted after a successful stock mutation.
///
/// Events are facts about stock that already changed; publishing them is
/// best-effort and never feeds back into the mutation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockEvent {
    /// A product's quantity changed.
    StockChanged(StockChanged),
    /// A product crossed into the low-stock band (`0 < stock <= min_stock`).
    LowStockReached(LowStockReached),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChanged {
    pub product_id: ProductId,
    pub new_stock: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockReached {
    /// Snapshot of the product with its post-movement stock.
    pub product: ProductSnapshot,
    pub occurred_at: DateTime<Utc>,
}

impl StockEvent {
    /// Stable event name/type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            StockEvent::StockChanged(_) => "stock.changed",
            StockEvent::LowStockReached(_) => "stock.low_stock_reached",
        }
    }

    /// When the event occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::StockChanged(e) => e.occurred_at,
            StockEvent::LowStockReached(e) => e.occurred_at,
        }
    }
}
