//! Session-scoped state: one authenticated customer, their cart and their
//! notification read set.

use shopsphere_cart::Cart;
use shopsphere_core::CustomerId;
use shopsphere_notifications::ReadSet;
use shopsphere_store::{ReadStateStore, StoreResult};

/// Everything that belongs to one signed-in customer.
///
/// Created at login, dropped at logout; owned by the caller. Cart and read
/// set are mutated synchronously - there is no intra-session contention.
#[derive(Debug)]
pub struct StorefrontSession {
    customer_id: CustomerId,
    cart: Cart,
    read: ReadSet,
}

impl StorefrontSession {
    /// Start a session: empty cart, read set loaded from the customer's
    /// durable slot.
    pub async fn login(
        read_state: &dyn ReadStateStore,
        customer_id: CustomerId,
    ) -> StoreResult<Self> {
        let read = read_state.load(customer_id).await?;
        tracing::info!(customer_id = %customer_id, "session started");
        Ok(Self {
            customer_id,
            cart: Cart::new(),
            read,
        })
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn read_set(&self) -> &ReadSet {
        &self.read
    }

    pub(crate) fn read_set_mut(&mut self) -> &mut ReadSet {
        &mut self.read
    }

    /// End the session. The cart is discarded; the read set already lives in
    /// the durable slot.
    pub fn logout(mut self) {
        self.cart.clear();
        tracing::info!(customer_id = %self.customer_id, "session ended");
    }
}
