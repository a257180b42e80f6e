//! `shopsphere-observability` - logging/tracing setup for ShopSphere
//! processes.

pub mod tracing;

pub use tracing::init;
