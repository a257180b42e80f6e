//! In-memory record store.
//!
//! Intended for tests/dev. Not optimized for performance; ids are assigned
//! from simple counters the way a toy JSON backend would.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use shopsphere_catalog::Product;
use shopsphere_core::{CustomerId, OrderId, ProductId};
use shopsphere_orders::{NewOrder, Order};

use crate::contract::{
    NewUser, OrderStore, ProductStore, StoreError, StoreResult, UserRecord, UserStore,
};

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
    orders: RwLock<BTreeMap<OrderId, Order>>,
    users: RwLock<BTreeMap<CustomerId, UserRecord>>,
    next_order_id: AtomicU64,
    next_user_id: AtomicU64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::persistence("lock poisoned")
    }
}

#[async_trait]
impl ProductStore for InMemoryRecordStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products.values().cloned().collect())
    }

    async fn get_product(&self, id: &ProductId) -> StoreResult<Product> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        products.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        if products.contains_key(&product.id) {
            return Err(StoreError::persistence(format!(
                "product '{}' already exists",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn replace_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound);
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> StoreResult<()> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        products.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl OrderStore for InMemoryRecordStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;
        Ok(orders.values().cloned().collect())
    }

    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;
        Ok(orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Order> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;
        orders.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let id = OrderId::new(self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1);
        let order = order.with_id(id);

        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn replace_order(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        if !orders.contains_key(&order.id) {
            return Err(StoreError::NotFound);
        }
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        orders.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl UserStore for InMemoryRecordStore {
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().cloned().collect())
    }

    async fn get_user(&self, id: CustomerId) -> StoreResult<UserRecord> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let id = CustomerId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = UserRecord {
            id,
            name: user.name,
            email: user.email,
            address: user.address,
        };

        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn replace_user(&self, user: UserRecord) -> StoreResult<UserRecord> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: CustomerId) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
