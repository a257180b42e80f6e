//! Per-customer read-state slot.
//!
//! One key-value slot per customer holding the serialized read-identity set
//! (a JSON array of strings). Loaded at session start, rewritten on every
//! mark.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shopsphere_core::CustomerId;
use shopsphere_notifications::ReadSet;

use crate::contract::{StoreError, StoreResult};

/// Client-durable storage for the read-identity set.
#[async_trait]
pub trait ReadStateStore: Send + Sync {
    /// Load the customer's read set. A customer with no slot yet gets an
    /// empty set, not an error.
    async fn load(&self, customer_id: CustomerId) -> StoreResult<ReadSet>;

    /// Overwrite the customer's slot with the full serialized set.
    async fn save(&self, customer_id: CustomerId, read: &ReadSet) -> StoreResult<()>;
}

/// In-memory slot store; keeps the serialized form to stay honest about the
/// round-trip.
#[derive(Debug, Default)]
pub struct InMemoryReadStateStore {
    slots: RwLock<HashMap<CustomerId, String>>,
}

impl InMemoryReadStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadStateStore for InMemoryReadStateStore {
    async fn load(&self, customer_id: CustomerId) -> StoreResult<ReadSet> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StoreError::persistence("lock poisoned"))?;

        match slots.get(&customer_id) {
            None => Ok(ReadSet::new()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| StoreError::persistence(format!("corrupt read-state slot: {e}"))),
        }
    }

    async fn save(&self, customer_id: CustomerId, read: &ReadSet) -> StoreResult<()> {
        let raw = serde_json::to_string(read)
            .map_err(|e| StoreError::persistence(format!("read-state serialization: {e}")))?;

        let mut slots = self
            .slots
            .write()
            .map_err(|_| StoreError::persistence("lock poisoned"))?;
        slots.insert(customer_id, raw);
        Ok(())
    }
}
