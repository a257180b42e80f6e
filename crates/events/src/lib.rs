//! `shopsphere-events` - typed cross-component signaling.
//!
//! Display surfaces (low-stock counters, unread badges) refresh off a
//! publish/subscribe channel instead of calling back into the services that
//! mutated state.

pub mod bus;
pub mod in_memory_bus;
pub mod signal;

pub use bus::{SignalBus, SignalError, Subscription};
pub use in_memory_bus::InMemorySignalBus;
pub use signal::StoreSignal;
