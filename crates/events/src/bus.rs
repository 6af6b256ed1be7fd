//! Notification publishing/subscription abstraction (mechanics only).
//!
//! The bus is the **transport layer** for stock notifications: the ledger
//! publishes after the mutation has been applied, subscribers (UI push
//! channels, alerting, workers) consume copies. It is intentionally
//! lightweight:
//!
//! - Transport-agnostic: in-memory channels here, anything fan-out-capable
//!   in production.
//! - Best-effort, at-least-once: subscribers must tolerate duplicates and
//!   gaps; the movement log is the source of truth, not the bus.
//! - No persistence, no ordering guarantees across publishers.
//!
//! A publish failure is surfaced to the caller but the caller (the ledger)
//! treats it as non-fatal: the stock mutation has already landed.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a notification stream.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics). Designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic pub/sub bus.
///
/// Implementations must be safe to share across threads; multiple request
/// handlers publish concurrently.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
