//! Admin-side order handling: status transitions and logistics updates.

use std::sync::Arc;

use thiserror::Error;

use shopsphere_core::OrderId;
use shopsphere_events::{SignalBus, StoreSignal};
use shopsphere_orders::{LifecycleError, Logistics, Order, OrderStatus};
use shopsphere_store::{OrderStore, StoreError};

/// Order-desk operation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderDeskError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives persisted orders through the lifecycle state machine.
pub struct OrderDesk {
    orders: Arc<dyn OrderStore>,
    signals: Arc<dyn SignalBus<StoreSignal>>,
}

impl OrderDesk {
    pub fn new(orders: Arc<dyn OrderStore>, signals: Arc<dyn SignalBus<StoreSignal>>) -> Self {
        Self { orders, signals }
    }

    /// Move an order to `requested`, subject to the lifecycle guard.
    ///
    /// Re-asserting the current status is accepted without a write or a
    /// signal; an actual change is persisted and announced so the customer's
    /// feed re-derives on its next read.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        requested: OrderStatus,
    ) -> Result<Order, OrderDeskError> {
        let mut order = self.orders.get_order(order_id).await?;

        let next = order.status.transition(requested)?;
        if next == order.status {
            return Ok(order);
        }

        let previous = order.status;
        order.status = next;
        let order = self.orders.replace_order(order).await?;

        tracing::info!(
            order_id = %order.id,
            from = %previous,
            to = %order.status,
            "order status changed"
        );
        self.publish(StoreSignal::OrderChanged { order_id: order.id });

        Ok(order)
    }

    /// Cancel an order. Same guard as any other transition: only Confirmed
    /// or Packed orders can be cancelled. Stock is **not** restored.
    pub async fn cancel(&self, order_id: OrderId) -> Result<Order, OrderDeskError> {
        self.set_status(order_id, OrderStatus::Cancelled).await
    }

    /// Replace an order's logistics block (carrier, tracking id, location).
    pub async fn update_logistics(
        &self,
        order_id: OrderId,
        logistics: Logistics,
    ) -> Result<Order, OrderDeskError> {
        let mut order = self.orders.get_order(order_id).await?;
        if order.logistics == logistics {
            return Ok(order);
        }

        order.logistics = logistics;
        let order = self.orders.replace_order(order).await?;

        tracing::info!(order_id = %order.id, "order logistics updated");
        self.publish(StoreSignal::OrderChanged { order_id: order.id });

        Ok(order)
    }

    fn publish(&self, signal: StoreSignal) {
        let topic = signal.topic();
        if let Err(e) = self.signals.publish(signal) {
            tracing::warn!(topic, error = %e, "signal publish failed");
        }
    }
}
