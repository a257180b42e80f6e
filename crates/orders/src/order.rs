use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopsphere_catalog::Customization;
use shopsphere_core::{CustomerId, OrderId, ProductId};

/// Sentinel tracking id meaning "no shipment yet".
pub const NO_TRACKING: &str = "-";

/// Order status lifecycle.
///
/// The fulfillment path is Confirmed → Packed → Shipped → Delivered, ranked
/// in that order. Cancelled sits outside the path as a second terminal state
/// reachable only before shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

/// Lifecycle violation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order is in terminal state {0}; no further transitions")]
    TerminalState(OrderStatus),
}

impl OrderStatus {
    /// The fulfillment path, in rank order.
    pub const FULFILLMENT_PATH: [OrderStatus; 4] = [
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// Position on the fulfillment path; `None` for Cancelled.
    pub fn rank(self) -> Option<u8> {
        match self {
            OrderStatus::Confirmed => Some(0),
            OrderStatus::Packed => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Cancellation window: before the parcel leaves the warehouse.
    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Packed)
    }

    /// Decide whether a move from `self` to `requested` is legal and return
    /// the status to store.
    ///
    /// Terminal states accept nothing. Cancellation is only accepted from
    /// Confirmed/Packed. On the fulfillment path, only same-or-forward moves
    /// are accepted; re-asserting the current status is a legal no-op.
    pub fn transition(self, requested: OrderStatus) -> Result<OrderStatus, LifecycleError> {
        if self.is_terminal() {
            return Err(LifecycleError::TerminalState(self));
        }

        if requested == OrderStatus::Cancelled {
            return if self.can_cancel() {
                Ok(OrderStatus::Cancelled)
            } else {
                Err(LifecycleError::InvalidTransition {
                    from: self,
                    to: requested,
                })
            };
        }

        match (self.rank(), requested.rank()) {
            (Some(from), Some(to)) if to >= from => Ok(requested),
            _ => Err(LifecycleError::InvalidTransition {
                from: self,
                to: requested,
            }),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Where a shipment currently is, as far as we know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logistics {
    pub carrier: String,
    pub tracking_id: String,
    pub current_location: String,
}

impl Logistics {
    /// The logistics block every order starts with.
    pub fn unassigned() -> Self {
        Self {
            carrier: "Not assigned".to_string(),
            tracking_id: NO_TRACKING.to_string(),
            current_location: "Order confirmed".to_string(),
        }
    }

    pub fn has_tracking(&self) -> bool {
        !self.tracking_id.is_empty() && self.tracking_id != NO_TRACKING
    }
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Frozen copy of a cart line at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    pub quantity: u32,
    pub customization: Customization,
    /// Price for one unit with the chosen options, in cents.
    pub unit_price: u64,
}

/// An order as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub placed_on: DateTime<Utc>,
    /// Σ unit price × quantity at creation, in cents. Never recomputed.
    pub amount: u64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub estimated_delivery: DateTime<Utc>,
    pub logistics: Logistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
}

impl Order {
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// An order about to be created; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub placed_on: DateTime<Utc>,
    pub amount: u64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub estimated_delivery: DateTime<Utc>,
    pub logistics: Logistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
}

impl NewOrder {
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            placed_on: self.placed_on,
            amount: self.amount,
            status: self.status,
            items: self.items,
            estimated_delivery: self.estimated_delivery,
            logistics: self.logistics,
            delivery_address: self.delivery_address,
        }
    }
}
