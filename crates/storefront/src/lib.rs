//! `shopsphere-storefront` - the session context and the services that
//! bridge cart, orders, notifications and inventory over the record store.
//!
//! Everything here is scoped to either one authenticated session
//! ([`session::StorefrontSession`]) or one service instance holding shared
//! handles to the store and the signal bus. There are no process-wide
//! singletons.

pub mod checkout;
pub mod feed;
pub mod inventory_desk;
pub mod order_desk;
pub mod session;

pub use checkout::{Checkout, CheckoutError, CheckoutReceipt, StockShortage};
pub use feed::NotificationFeed;
pub use inventory_desk::{InventoryDesk, InventoryDeskError};
pub use order_desk::{OrderDesk, OrderDeskError};
pub use session::StorefrontSession;
