//! The customer-facing notification feed.
//!
//! Derived fresh from the order list on every read; only the read-identity
//! set is persisted, through the session's durable slot.

use std::sync::Arc;

use shopsphere_notifications::{NotificationItem, derive, unread_count};
use shopsphere_store::{OrderStore, ReadStateStore, StoreResult};

use crate::session::StorefrontSession;

pub struct NotificationFeed {
    orders: Arc<dyn OrderStore>,
    read_state: Arc<dyn ReadStateStore>,
}

impl NotificationFeed {
    pub fn new(orders: Arc<dyn OrderStore>, read_state: Arc<dyn ReadStateStore>) -> Self {
        Self { orders, read_state }
    }

    /// Re-derive the feed from the customer's current orders.
    pub async fn refresh(
        &self,
        session: &StorefrontSession,
    ) -> StoreResult<Vec<NotificationItem>> {
        let orders = self
            .orders
            .list_orders_for_customer(session.customer_id())
            .await?;
        Ok(derive(&orders, session.read_set()))
    }

    /// Record one item as read and persist the set. Marking an
    /// already-read item is a no-op (no write is issued).
    pub async fn mark_as_read(
        &self,
        session: &mut StorefrontSession,
        item: &NotificationItem,
    ) -> StoreResult<()> {
        if session.read_set_mut().insert(item.identity()) {
            self.save(session).await?;
        }
        Ok(())
    }

    /// Record every given item as read; persists at most once.
    pub async fn mark_all_as_read(
        &self,
        session: &mut StorefrontSession,
        items: &[NotificationItem],
    ) -> StoreResult<()> {
        let mut changed = false;
        for item in items {
            changed |= session.read_set_mut().insert(item.identity());
        }
        if changed {
            self.save(session).await?;
        }
        Ok(())
    }

    /// Unread items in a freshly derived feed. Recomputed every call, never
    /// cached.
    pub async fn unread_count(&self, session: &StorefrontSession) -> StoreResult<usize> {
        Ok(unread_count(&self.refresh(session).await?))
    }

    async fn save(&self, session: &StorefrontSession) -> StoreResult<()> {
        self.read_state
            .save(session.customer_id(), session.read_set())
            .await
    }
}
