//! Traits the external record store must satisfy.
//!
//! Each collection exposes the same five verbs: list, get, create, replace,
//! delete. The core treats every call as succeed/fail - no retries, no
//! timeout policy, no transactions across collections.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopsphere_catalog::Product;
use shopsphere_core::{CustomerId, OrderId, ProductId};
use shopsphere_orders::{Address, NewOrder, Order};

/// Record store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record under the given id.
    #[error("record not found")]
    NotFound,

    /// The write (or read) itself failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl StoreError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Products collection.
///
/// Product ids are external catalog keys supplied by the caller, so `create`
/// takes the full record and rejects duplicates.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn get_product(&self, id: &ProductId) -> StoreResult<Product>;

    async fn create_product(&self, product: Product) -> StoreResult<Product>;

    /// Replace the record under `product.id`; fails with `NotFound` if it
    /// does not exist.
    async fn replace_product(&self, product: Product) -> StoreResult<Product>;

    async fn delete_product(&self, id: &ProductId) -> StoreResult<()>;
}

/// Orders collection. The store assigns ids at create.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Field-equality filter: only this customer's orders.
    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>>;

    async fn get_order(&self, id: OrderId) -> StoreResult<Order>;

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order>;

    async fn replace_order(&self, order: Order) -> StoreResult<Order>;

    async fn delete_order(&self, id: OrderId) -> StoreResult<()>;
}

/// Minimal profile of a registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A customer profile about to be created; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Users collection. The store assigns ids at create.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>>;

    async fn get_user(&self, id: CustomerId) -> StoreResult<UserRecord>;

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRecord>;

    async fn replace_user(&self, user: UserRecord) -> StoreResult<UserRecord>;

    async fn delete_user(&self, id: CustomerId) -> StoreResult<()>;
}
