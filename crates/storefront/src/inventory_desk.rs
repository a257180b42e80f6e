//! Admin-side inventory handling: catalog additions, stock and threshold
//! updates, and the low-stock view.

use std::sync::Arc;

use thiserror::Error;

use shopsphere_catalog::{Product, is_low_stock};
use shopsphere_core::{DomainError, ProductId};
use shopsphere_events::{SignalBus, StoreSignal};
use shopsphere_store::{ProductStore, StoreError};

/// Inventory-desk operation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryDeskError {
    /// The product record failed load-time validation.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Maintains the catalog's stock fields and feeds the low-stock view.
pub struct InventoryDesk {
    products: Arc<dyn ProductStore>,
    signals: Arc<dyn SignalBus<StoreSignal>>,
}

impl InventoryDesk {
    pub fn new(
        products: Arc<dyn ProductStore>,
        signals: Arc<dyn SignalBus<StoreSignal>>,
    ) -> Self {
        Self { products, signals }
    }

    /// Validate and add a new catalog record.
    pub async fn add_product(&self, product: Product) -> Result<Product, InventoryDeskError> {
        product.validate()?;
        let product = self.products.create_product(product).await?;

        tracing::info!(product_id = %product.id, "product added");
        self.publish(StoreSignal::InventoryChanged {
            product_id: product.id.clone(),
        });
        Ok(product)
    }

    pub async fn set_stock_level(
        &self,
        id: &ProductId,
        stock_level: u32,
    ) -> Result<Product, InventoryDeskError> {
        self.mutate(id, |p| p.stock_level = Some(stock_level)).await
    }

    pub async fn set_reorder_threshold(
        &self,
        id: &ProductId,
        threshold: u32,
    ) -> Result<Product, InventoryDeskError> {
        self.mutate(id, |p| p.reorder_threshold = Some(threshold))
            .await
    }

    /// Update stock level and threshold in one write.
    pub async fn update_inventory(
        &self,
        id: &ProductId,
        stock_level: u32,
        threshold: u32,
    ) -> Result<Product, InventoryDeskError> {
        self.mutate(id, |p| {
            p.stock_level = Some(stock_level);
            p.reorder_threshold = Some(threshold);
        })
        .await
    }

    /// Products at or below their reorder threshold.
    pub async fn low_stock_products(&self) -> Result<Vec<Product>, InventoryDeskError> {
        let products = self.products.list_products().await?;
        Ok(products.into_iter().filter(is_low_stock).collect())
    }

    async fn mutate(
        &self,
        id: &ProductId,
        apply: impl FnOnce(&mut Product),
    ) -> Result<Product, InventoryDeskError> {
        let mut product = self.products.get_product(id).await?;
        apply(&mut product);
        let product = self.products.replace_product(product).await?;

        tracing::info!(product_id = %product.id, stock_level = ?product.stock_level, "inventory updated");
        self.publish(StoreSignal::InventoryChanged {
            product_id: product.id.clone(),
        });
        Ok(product)
    }

    fn publish(&self, signal: StoreSignal) {
        let topic = signal.topic();
        if let Err(e) = self.signals.publish(signal) {
            tracing::warn!(topic, error = %e, "signal publish failed");
        }
    }
}
