//! `shopsphere-orders` - the order record and its lifecycle state machine.
//!
//! Orders are created at checkout and from then on mutated only through
//! status/logistics updates; the status machine in [`order::OrderStatus`]
//! guards every move.

pub mod order;
pub mod tracking;

pub use order::{
    Address, LifecycleError, Logistics, NO_TRACKING, NewOrder, Order, OrderItem, OrderStatus,
};
pub use tracking::tracking_url;
