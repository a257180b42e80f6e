//! Checkout: turn a valid cart into a persisted order.
//!
//! The only transactional step is the order create itself. Stock decrements
//! afterwards are best-effort and mutually independent - a failed decrement
//! is reported but never rolls back the order, so stock can drift from true
//! sold quantity. That weakness is surfaced, not hidden.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use shopsphere_catalog::{Availability, Product, available_units};
use shopsphere_core::ProductId;
use shopsphere_events::{SignalBus, StoreSignal};
use shopsphere_orders::{Address, Logistics, NewOrder, Order, OrderItem, OrderStatus};
use shopsphere_store::{OrderStore, ProductStore, StoreError, StoreResult};

use crate::session::StorefrontSession;

/// One product that cannot cover the quantity the cart requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockShortage {
    pub product_id: ProductId,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

impl core::fmt::Display for StockShortage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.available == 0 {
            write!(f, "'{}' is out of stock", self.name)
        } else {
            write!(
                f,
                "'{}': only {} unit(s) available, but {} unit(s) in cart",
                self.name, self.available, self.requested
            )
        }
    }
}

fn shortage_report(shortages: &[StockShortage]) -> String {
    shortages
        .iter()
        .map(StockShortage::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checkout failure. Nothing has been written unless stated otherwise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    /// Every violating product, in one report.
    #[error("cannot proceed with checkout: {}", shortage_report(.0))]
    OutOfStock(Vec<StockShortage>),

    /// The order create (or a precondition read) failed; the cart is intact.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a successful checkout.
///
/// `decrement_failures` lists products whose post-order stock write failed;
/// the order itself stands regardless.
#[derive(Debug)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub decrement_failures: Vec<(ProductId, StoreError)>,
}

/// Converts a valid cart into a persisted order and issues the best-effort
/// inventory decrements.
pub struct Checkout {
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    signals: Arc<dyn SignalBus<StoreSignal>>,
}

impl Checkout {
    pub fn new(
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        signals: Arc<dyn SignalBus<StoreSignal>>,
    ) -> Self {
        Self {
            products,
            orders,
            signals,
        }
    }

    /// Place an order from the session's cart.
    ///
    /// Preconditions run before any write: the cart must be non-empty and
    /// every distinct product's aggregate quantity must fit a fresh stock
    /// read. On success the cart is cleared; on any failure it is left
    /// untouched for retry.
    pub async fn place_order(
        &self,
        session: &mut StorefrontSession,
        delivery_address: Address,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if session.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Aggregate requested units per distinct product.
        let mut requested: BTreeMap<ProductId, u32> = BTreeMap::new();
        for line in session.cart().lines() {
            *requested.entry(line.product.id.clone()).or_default() += line.quantity;
        }

        let fetched = self.check_stock(&requested).await?;

        let placed_on = Utc::now();
        let order = NewOrder {
            customer_id: session.customer_id(),
            placed_on,
            amount: session.cart().subtotal(),
            status: OrderStatus::Confirmed,
            items: session
                .cart()
                .lines()
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    preview_image: line.product.preview_image.clone(),
                    quantity: line.quantity,
                    customization: line.customization.clone(),
                    unit_price: line.unit_price,
                })
                .collect(),
            estimated_delivery: placed_on + Duration::days(7),
            logistics: Logistics::unassigned(),
            delivery_address: Some(delivery_address),
        };

        let order = self.orders.create_order(order).await?;
        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            amount = order.amount,
            "order placed"
        );

        // Best-effort decrements; one failure neither stops the others nor
        // touches the already-created order.
        let mut decrement_failures = Vec::new();
        for (product_id, quantity) in &requested {
            if fetched[product_id].stock_level.is_none() {
                continue;
            }
            match self.decrement_stock(product_id, *quantity).await {
                Ok(()) => self.publish(StoreSignal::InventoryChanged {
                    product_id: product_id.clone(),
                }),
                Err(e) => {
                    tracing::warn!(
                        product_id = %product_id,
                        error = %e,
                        "post-order stock decrement failed"
                    );
                    decrement_failures.push((product_id.clone(), e));
                }
            }
        }

        self.publish(StoreSignal::OrderChanged { order_id: order.id });
        session.cart_mut().clear();

        Ok(CheckoutReceipt {
            order,
            decrement_failures,
        })
    }

    /// Fresh per-product stock reads; collects every violation rather than
    /// stopping at the first.
    async fn check_stock(
        &self,
        requested: &BTreeMap<ProductId, u32>,
    ) -> Result<BTreeMap<ProductId, Product>, CheckoutError> {
        let mut fetched = BTreeMap::new();
        let mut shortages = Vec::new();

        for (product_id, quantity) in requested {
            let product = self.products.get_product(product_id).await?;
            if let Availability::Finite(available) = available_units(&product) {
                if available == 0 || *quantity > available {
                    shortages.push(StockShortage {
                        product_id: product_id.clone(),
                        name: product.name.clone(),
                        requested: *quantity,
                        available,
                    });
                }
            }
            fetched.insert(product_id.clone(), product);
        }

        if shortages.is_empty() {
            Ok(fetched)
        } else {
            Err(CheckoutError::OutOfStock(shortages))
        }
    }

    /// Re-read the product and clamp its stock at zero.
    async fn decrement_stock(&self, id: &ProductId, quantity: u32) -> StoreResult<()> {
        let mut product = self.products.get_product(id).await?;
        let Some(current) = product.stock_level else {
            return Ok(());
        };
        product.stock_level = Some(current.saturating_sub(quantity));
        self.products.replace_product(product).await?;
        Ok(())
    }

    fn publish(&self, signal: StoreSignal) {
        let topic = signal.topic();
        if let Err(e) = self.signals.publish(signal) {
            tracing::warn!(topic, error = %e, "signal publish failed");
        }
    }
}
