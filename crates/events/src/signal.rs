//! The closed set of cross-component refresh signals.

use serde::{Deserialize, Serialize};

use shopsphere_core::{OrderId, ProductId};

/// A hint that store-held state changed and dependent surfaces should
/// re-read it (low-stock counters, unread badges, order lists).
///
/// Signals carry the id of what changed, never the new state: the store
/// stays the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreSignal {
    /// A product's stock level or reorder threshold changed.
    InventoryChanged { product_id: ProductId },
    /// An order was created, or its status/logistics changed.
    OrderChanged { order_id: OrderId },
}

impl StoreSignal {
    /// Stable topic name, for log lines and routing.
    pub fn topic(&self) -> &'static str {
        match self {
            StoreSignal::InventoryChanged { .. } => "inventory.changed",
            StoreSignal::OrderChanged { .. } => "order.changed",
        }
    }
}
