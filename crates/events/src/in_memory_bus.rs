//! In-memory signal bus for tests/dev and single-process deployments.

use std::sync::{Mutex, mpsc};

use crate::bus::{SignalBus, SignalError, Subscription};

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - Subscribers must be idempotent
#[derive(Debug)]
pub struct InMemorySignalBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemorySignalBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemorySignalBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> SignalBus<M> for InMemorySignalBus<M>
where
    M: Clone + Send + 'static,
{
    fn publish(&self, signal: M) -> Result<(), SignalError> {
        let mut subs = self.subscribers.lock().map_err(|_| SignalError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(signal.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive signals until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}
