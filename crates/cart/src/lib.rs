//! `shopsphere-cart` - the stock-aware cart reservation engine.
//!
//! A cart is a soft, non-locking reservation: every mutation re-checks the
//! requested quantities against the stock snapshot its lines carry, so the
//! per-product reserved sum never exceeds finite stock.

pub mod cart;

pub use cart::{Cart, CartError, CartLine, FLAT_SHIPPING_CENTS};
