use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopsphere_catalog::{Availability, Customization, ProductSnapshot};
use shopsphere_core::LineItemId;

/// Flat shipping fee charged on any non-empty cart, in cents.
pub const FLAT_SHIPPING_CENTS: u64 = 1_500;

/// Cart mutation failure.
///
/// `OutOfStock` carries the maximum quantity that would still have been
/// accepted so callers can clamp instead of guessing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error(
        "only {available} unit(s) of '{product}' available; at most {max_allowed} more can be reserved"
    )]
    OutOfStock {
        product: String,
        available: u32,
        max_allowed: u32,
    },

    #[error("quantity must be positive (got {0})")]
    InvalidQuantity(u32),

    #[error("no cart line with id {0}")]
    NotFound(LineItemId),
}

/// One cart entry: product snapshot + chosen customization + quantity.
///
/// `unit_price` is fixed when the line is created and never recomputed from
/// the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineItemId,
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub customization: Customization,
    /// Price for one unit with the chosen options, in cents.
    pub unit_price: u64,
}

impl CartLine {
    /// New line with quantity 1.
    pub fn new(product: ProductSnapshot, customization: Customization, unit_price: u64) -> Self {
        Self {
            id: LineItemId::new(),
            product,
            quantity: 1,
            customization,
            unit_price,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// One customer's in-progress line items.
///
/// Invariant: for any product with finite stock S, the sum of quantities
/// across lines referencing it never exceeds S. Every mutation either fully
/// applies or leaves the cart untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units of `product_id` already reserved by lines other than `excluding`.
    fn reserved_elsewhere(&self, line: &CartLine, excluding: Option<LineItemId>) -> u32 {
        self.lines
            .iter()
            .filter(|l| Some(l.id) != excluding && l.product.id == line.product.id)
            .map(|l| l.quantity)
            .sum()
    }

    fn capacity_check(
        line: &CartLine,
        reserved: u32,
        requested: u32,
    ) -> Result<(), CartError> {
        let Some(available) = Availability::of(line.product.stock_level).finite() else {
            return Ok(());
        };
        if available == 0 || reserved + requested > available {
            return Err(CartError::OutOfStock {
                product: line.product.name.clone(),
                available,
                max_allowed: available.saturating_sub(reserved),
            });
        }
        Ok(())
    }

    /// Append a line, subject to the capacity check against stock already
    /// reserved by other lines of the same product.
    pub fn add(&mut self, line: CartLine) -> Result<LineItemId, CartError> {
        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let reserved = self.reserved_elsewhere(&line, None);
        Self::capacity_check(&line, reserved, line.quantity)?;

        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Change one line's quantity, re-running the capacity check over the
    /// *other* lines of the same product. On failure nothing changes and the
    /// error carries the maximum quantity that would have been accepted.
    pub fn update_quantity(
        &mut self,
        line_id: LineItemId,
        new_quantity: u32,
    ) -> Result<(), CartError> {
        if new_quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let line = self
            .lines
            .iter()
            .find(|l| l.id == line_id)
            .ok_or(CartError::NotFound(line_id))?;

        let reserved = self.reserved_elsewhere(line, Some(line_id));
        Self::capacity_check(line, reserved, new_quantity)?;

        // Checks passed; mutate only the targeted line.
        for l in &mut self.lines {
            if l.id == line_id {
                l.quantity = new_quantity;
                break;
            }
        }
        Ok(())
    }

    /// Drop a line. Freeing stock can never violate the reservation
    /// invariant, so removal is unconditional (unknown ids are a no-op).
    pub fn remove(&mut self, line_id: LineItemId) {
        self.lines.retain(|l| l.id != line_id);
    }

    /// Empty the cart (post-checkout, logout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ unit price × quantity, in cents.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * l.quantity as u64)
            .sum()
    }

    /// 10% of the subtotal, rounded down to the cent.
    pub fn tax(&self) -> u64 {
        self.subtotal() / 10
    }

    /// Flat fee on non-empty carts.
    pub fn shipping(&self) -> u64 {
        if self.lines.is_empty() {
            0
        } else {
            FLAT_SHIPPING_CENTS
        }
    }

    pub fn total(&self) -> u64 {
        self.subtotal() + self.tax() + self.shipping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsphere_catalog::ProductSnapshot;
    use shopsphere_core::ProductId;

    fn snapshot(id: &str, stock: Option<u32>) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            preview_image: None,
            stock_level: stock,
        }
    }

    fn line(id: &str, stock: Option<u32>, qty: u32, price: u64) -> CartLine {
        CartLine::new(snapshot(id, stock), Customization::new(), price).with_quantity(qty)
    }

    #[test]
    fn add_defaults_to_quantity_one() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("P001", Some(5)),
            Customization::new(),
            1_000,
        ))
        .unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn add_rejects_when_reserved_plus_requested_exceeds_stock() {
        let mut cart = Cart::new();
        cart.add(line("P001", Some(2), 2, 1_000)).unwrap();

        let err = cart.add(line("P001", Some(2), 1, 1_000)).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product: "Product P001".to_string(),
                available: 2,
                max_allowed: 0,
            }
        );
        // Nothing partially applied.
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn add_to_zero_stock_fails_regardless_of_quantity() {
        for qty in [1, 2, 100] {
            let mut cart = Cart::new();
            let err = cart.add(line("P001", Some(0), qty, 1_000)).unwrap_err();
            assert!(matches!(err, CartError::OutOfStock { available: 0, .. }));
        }
    }

    #[test]
    fn unbounded_stock_never_rejects() {
        let mut cart = Cart::new();
        cart.add(line("P001", None, 1_000, 500)).unwrap();
        cart.add(line("P001", None, 1_000, 500)).unwrap();
        assert_eq!(cart.item_count(), 2_000);
    }

    #[test]
    fn distinct_products_reserve_independently() {
        let mut cart = Cart::new();
        cart.add(line("P001", Some(1), 1, 1_000)).unwrap();
        cart.add(line("P002", Some(1), 1, 2_000)).unwrap();
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn update_quantity_rejects_zero() {
        let mut cart = Cart::new();
        let id = cart.add(line("P001", Some(5), 1, 1_000)).unwrap();
        assert_eq!(
            cart.update_quantity(id, 0),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_counts_other_lines_and_reports_max() {
        let mut cart = Cart::new();
        let first = cart.add(line("P001", Some(5), 3, 1_000)).unwrap();
        cart.add(line("P001", Some(5), 2, 1_000)).unwrap();

        // 2 reserved elsewhere, so the first line can grow to at most 3.
        let err = cart.update_quantity(first, 4).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product: "Product P001".to_string(),
                available: 5,
                max_allowed: 3,
            }
        );
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.update_quantity(first, 3).unwrap();
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[1].quantity, 2);
    }

    #[test]
    fn update_quantity_unknown_line_is_not_found() {
        let mut cart = Cart::new();
        let ghost = LineItemId::new();
        assert_eq!(
            cart.update_quantity(ghost, 1),
            Err(CartError::NotFound(ghost))
        );
    }

    #[test]
    fn remove_never_fails() {
        let mut cart = Cart::new();
        let id = cart.add(line("P001", Some(1), 1, 1_000)).unwrap();
        cart.remove(id);
        assert!(cart.is_empty());
        // Unknown id: still fine.
        cart.remove(LineItemId::new());
    }

    #[test]
    fn remove_frees_stock_for_new_lines() {
        let mut cart = Cart::new();
        let id = cart.add(line("P001", Some(1), 1, 1_000)).unwrap();
        assert!(cart.add(line("P001", Some(1), 1, 1_000)).is_err());

        cart.remove(id);
        cart.add(line("P001", Some(1), 1, 1_000)).unwrap();
    }

    #[test]
    fn totals_follow_the_fixed_formula() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), 0);

        cart.add(line("P001", Some(10), 2, 1_000)).unwrap();
        cart.add(line("P002", None, 1, 3_000)).unwrap();

        assert_eq!(cart.subtotal(), 5_000);
        assert_eq!(cart.tax(), 500);
        assert_eq!(cart.shipping(), FLAT_SHIPPING_CENTS);
        assert_eq!(cart.total(), 5_000 + 500 + FLAT_SHIPPING_CENTS);

        cart.clear();
        assert_eq!(cart.shipping(), 0);
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn prices_are_fixed_at_add_time() {
        let mut cart = Cart::new();
        let id = cart.add(line("P001", Some(10), 1, 1_000)).unwrap();
        // A later catalog price change does not touch existing lines.
        cart.update_quantity(id, 2).unwrap();
        assert_eq!(cart.lines()[0].unit_price, 1_000);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        #[derive(Debug, Clone)]
        enum Op {
            Add { qty: u32 },
            Update { line: usize, qty: u32 },
            Remove { line: usize },
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1u32..6).prop_map(|qty| Op::Add { qty }),
                (0usize..8, 0u32..6).prop_map(|(line, qty)| Op::Update { line, qty }),
                (0usize..8).prop_map(|line| Op::Remove { line }),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: under any add/update/remove sequence, the reserved
            /// sum for a finite-stock product never exceeds its stock.
            #[test]
            fn reserved_sum_never_exceeds_stock(
                stock in 0u32..12,
                ops in proptest::collection::vec(op_strategy(), 1..40)
            ) {
                let mut cart = Cart::new();

                for op in ops {
                    match op {
                        Op::Add { qty } => {
                            let _ = cart.add(line("P001", Some(stock), qty, 1_000));
                        }
                        Op::Update { line, qty } => {
                            if let Some(l) = cart.lines().get(line) {
                                let _ = cart.update_quantity(l.id, qty);
                            }
                        }
                        Op::Remove { line } => {
                            if let Some(l) = cart.lines().get(line) {
                                cart.remove(l.id);
                            }
                        }
                    }

                    let mut reserved: BTreeMap<&str, u32> = BTreeMap::new();
                    for l in cart.lines() {
                        *reserved.entry(l.product.id.as_str()).or_default() += l.quantity;
                    }
                    for total in reserved.values() {
                        prop_assert!(*total <= stock);
                    }
                }
            }

            /// Property: totals are internally consistent after any sequence.
            #[test]
            fn total_is_sum_of_parts(
                ops in proptest::collection::vec(op_strategy(), 1..30)
            ) {
                let mut cart = Cart::new();
                for op in ops {
                    if let Op::Add { qty } = op {
                        let _ = cart.add(line("P002", None, qty, 750));
                    }
                }
                prop_assert_eq!(
                    cart.total(),
                    cart.subtotal() + cart.tax() + cart.shipping()
                );
            }
        }
    }
}
