//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Whether a failed write reached the underlying store.
///
/// Callers use this to judge retry safety: a `NotApplied` failure can be
/// retried blindly, an `Unknown` one cannot (the write may have landed).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// The write definitely did not land.
    NotApplied,
    /// It is ambiguous whether the write landed.
    Unknown,
}

/// Error taxonomy for stock mutation and aggregation operations.
///
/// Keep this focused on deterministic domain failures plus the single
/// storage-fault escape hatch. None of these are retried internally; the
/// caller decides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// A deduction would drive stock negative.
    ///
    /// Carries the quantities needed for an actionable caller-facing message.
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: u64 },

    /// Zero or otherwise meaningless quantity delta.
    #[error("invalid delta: {0}")]
    InvalidDelta(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The underlying read/write primitive failed.
    #[error("storage fault ({status:?}): {message}")]
    Storage { status: WriteStatus, message: String },
}

impl LedgerError {
    pub fn insufficient_stock(available: i64, requested: u64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn invalid_delta(msg: impl Into<String>) -> Self {
        Self::InvalidDelta(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage_not_applied(msg: impl Into<String>) -> Self {
        Self::Storage {
            status: WriteStatus::NotApplied,
            message: msg.into(),
        }
    }

    pub fn storage_unknown(msg: impl Into<String>) -> Self {
        Self::Storage {
            status: WriteStatus::Unknown,
            message: msg.into(),
        }
    }
}
