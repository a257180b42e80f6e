//! Signal publishing/subscription abstraction (mechanics only).
//!
//! The bus is intentionally lightweight: transport-agnostic, best-effort
//! fan-out, no persistence. Signals are refresh hints, not a source of truth
//! - a consumer that misses one re-reads the store on its next cycle, so
//! at-least-once (or lossy) delivery is acceptable and consumers must be
//! idempotent.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

/// Publish failure.
///
/// One concrete error type (rather than an associated type) keeps the trait
/// object-safe, so services can hold `Arc<dyn SignalBus<M>>`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Publish failed due to internal lock poisoning.
    #[error("signal bus lock poisoned")]
    Poisoned,
}

/// A subscription to a signal stream.
///
/// Each subscription gets a copy of every signal published to the bus
/// (broadcast semantics). Designed for single-threaded consumption; signals
/// arrive in publish order per publisher.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next signal is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a signal without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a signal.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic signal bus (pub/sub abstraction).
///
/// Publishers are the services that mutate state (checkout, order desk,
/// inventory desk); subscribers are display surfaces that need to refresh.
/// The trait requires `Send + Sync` so one bus can be shared across threads.
pub trait SignalBus<M>: Send + Sync {
    fn publish(&self, signal: M) -> Result<(), SignalError>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> SignalBus<M> for Arc<B>
where
    B: SignalBus<M> + ?Sized,
{
    fn publish(&self, signal: M) -> Result<(), SignalError> {
        (**self).publish(signal)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
