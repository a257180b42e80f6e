use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopsphere_core::OrderId;
use shopsphere_orders::{Logistics, Order, OrderStatus};

use crate::read_set::ReadSet;

/// What a notification is about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The order's status itself.
    Order,
    /// Movement of the shipment carrying the order.
    Shipment,
}

/// One entry of the derived feed. Never persisted; `read` is computed from
/// the customer's [`ReadSet`] at derivation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub order_id: OrderId,
    pub order_label: String,
    /// Name of the order's first line, for display.
    pub order_name: String,
    pub kind: NotificationKind,
    pub status: OrderStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub logistics: Logistics,
}

impl NotificationItem {
    /// Deterministic identity correlating this item with its persisted
    /// read/unread record.
    ///
    /// Order notifications key on (order, status): when the status changes a
    /// fresh identity is minted, so an earlier mark-as-read never suppresses
    /// the next update. Shipment notifications key on the order alone.
    pub fn identity(&self) -> String {
        match self.kind {
            NotificationKind::Order => format!("order:{}:{}", self.order_id, self.status),
            NotificationKind::Shipment => format!("shipment:{}", self.order_id),
        }
    }
}

/// Customer-facing message for each order status.
pub fn status_message(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Confirmed => "Your order has been confirmed and is being prepared.",
        OrderStatus::Packed => "Your order has been packed and is ready for shipment.",
        OrderStatus::Shipped => "Your order has been shipped and is on its way!",
        OrderStatus::Delivered => "Your order has been delivered successfully!",
        OrderStatus::Cancelled => "Your order has been cancelled.",
    }
}

/// Human order reference, e.g. "#ORD-000042".
pub fn order_label(order_id: OrderId) -> String {
    format!("#ORD-{:06}", order_id.as_u64())
}

/// Map a customer's orders plus their read set into the notification feed.
///
/// Pure and deterministic: identical inputs always yield the identical list.
/// Sorted by order id descending (newest order first); within one order the
/// status item precedes the shipment item.
pub fn derive(orders: &[Order], read: &ReadSet) -> Vec<NotificationItem> {
    let mut items = Vec::new();

    for order in orders {
        let order_name = order
            .items
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "Order".to_string());

        let mut item = NotificationItem {
            order_id: order.id,
            order_label: order_label(order.id),
            order_name: order_name.clone(),
            kind: NotificationKind::Order,
            status: order.status,
            message: status_message(order.status).to_string(),
            timestamp: order.placed_on,
            read: false,
            logistics: order.logistics.clone(),
        };
        item.read = read.contains(&item.identity());
        items.push(item);

        let shipped = matches!(order.status, OrderStatus::Shipped | OrderStatus::Delivered);
        if shipped && order.logistics.has_tracking() {
            let location = if order.logistics.current_location.trim().is_empty() {
                "In transit"
            } else {
                order.logistics.current_location.as_str()
            };
            let mut item = NotificationItem {
                order_id: order.id,
                order_label: order_label(order.id),
                order_name,
                kind: NotificationKind::Shipment,
                status: order.status,
                message: format!("Shipment update: {location}"),
                timestamp: order.placed_on,
                read: false,
                logistics: order.logistics.clone(),
            };
            item.read = read.contains(&item.identity());
            items.push(item);
        }
    }

    items.sort_by(|a, b| b.order_id.cmp(&a.order_id));
    items
}

/// Count of unread items. Always recomputed from the emitted list, never
/// cached.
pub fn unread_count(items: &[NotificationItem]) -> usize {
    items.iter().filter(|i| !i.read).count()
}
