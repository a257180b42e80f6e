//! The stock ledger: read-only availability lookups against a product's
//! `stock_level` field. No reservation is held anywhere - correctness under
//! concurrent checkouts comes from the store clamping stock at zero.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// How many units can still be sold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// No stock tracking: any quantity is sellable.
    Unbounded,
    Finite(u32),
}

impl Availability {
    /// Interpret a raw `stock_level` field (absent = unbounded).
    pub fn of(stock_level: Option<u32>) -> Self {
        match stock_level {
            None => Availability::Unbounded,
            Some(units) => Availability::Finite(units),
        }
    }

    pub fn finite(&self) -> Option<u32> {
        match self {
            Availability::Unbounded => None,
            Availability::Finite(units) => Some(*units),
        }
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Availability::Finite(0))
    }
}

/// How many units of `product` can currently be sold.
pub fn available_units(product: &Product) -> Availability {
    Availability::of(product.stock_level)
}

pub fn is_in_stock(product: &Product) -> bool {
    !available_units(product).is_out()
}

/// True when finite stock has fallen to or below the reorder threshold.
/// Products without a threshold (or without stock tracking) never alert.
pub fn is_low_stock(product: &Product) -> bool {
    match (product.stock_level, product.reorder_threshold) {
        (Some(stock), Some(threshold)) => stock <= threshold,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_stock_level_is_unbounded() {
        let product = Product::new("P001", "Made To Order", 5_000);
        assert_eq!(available_units(&product), Availability::Unbounded);
        assert!(is_in_stock(&product));
    }

    #[test]
    fn zero_stock_is_out() {
        let mut product = Product::new("P001", "Pendant", 5_000);
        product.stock_level = Some(0);
        assert!(available_units(&product).is_out());
        assert!(!is_in_stock(&product));
    }

    #[test]
    fn low_stock_requires_both_fields() {
        let mut product = Product::new("P001", "Pendant", 5_000);
        assert!(!is_low_stock(&product));

        product.stock_level = Some(2);
        assert!(!is_low_stock(&product));

        product.reorder_threshold = Some(5);
        assert!(is_low_stock(&product));

        product.stock_level = Some(6);
        assert!(!is_low_stock(&product));
    }
}
