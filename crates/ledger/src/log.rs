//! The Movement Log collaborator surface.
//!
//! Append-only: the ledger can add records and read them back per product,
//! never update or delete.

use std::sync::Arc;

use thiserror::Error;

use stockpile_core::{ProductId, WriteStatus};

use crate::movement::{MovementRecord, NewMovement};

/// Failure modes of the Movement Log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MovementLogError {
    /// The backing log failed; `status` tells whether the append landed.
    #[error("log backend fault: {message}")]
    Backend { status: WriteStatus, message: String },
}

impl MovementLogError {
    pub fn backend(status: WriteStatus, msg: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: msg.into(),
        }
    }
}

/// Movement Log collaborator.
pub trait MovementLog: Send + Sync {
    /// Persist a movement, assigning its id and insertion sequence.
    fn append(&self, movement: NewMovement) -> Result<MovementRecord, MovementLogError>;

    /// All records for one product in insertion order.
    fn for_product(&self, product_id: ProductId) -> Result<Vec<MovementRecord>, MovementLogError>;
}

impl<L> MovementLog for Arc<L>
where
    L: MovementLog + ?Sized,
{
    fn append(&self, movement: NewMovement) -> Result<MovementRecord, MovementLogError> {
        (**self).append(movement)
    }

    fn for_product(&self, product_id: ProductId) -> Result<Vec<MovementRecord>, MovementLogError> {
        (**self).for_product(product_id)
    }
}
