use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopsphere_core::{DomainError, DomainResult, ProductId};

/// The closed set of customization dimensions a product can offer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Colour,
    Size,
    Material,
}

impl OptionKind {
    pub const ALL: [OptionKind; 3] = [OptionKind::Colour, OptionKind::Size, OptionKind::Material];
}

impl core::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            OptionKind::Colour => "colour",
            OptionKind::Size => "size",
            OptionKind::Material => "material",
        };
        f.write_str(s)
    }
}

/// One customization dimension: the allowed values and the price adjustment
/// (in cents, may be negative) each value adds to the base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub values: Vec<String>,
    pub price_adjustments: BTreeMap<String, i64>,
}

impl OptionGroup {
    pub fn new<V: Into<String>>(entries: impl IntoIterator<Item = (V, i64)>) -> Self {
        let mut values = Vec::new();
        let mut price_adjustments = BTreeMap::new();
        for (value, adjustment) in entries {
            let value = value.into();
            values.push(value.clone());
            price_adjustments.insert(value, adjustment);
        }
        Self {
            values,
            price_adjustments,
        }
    }

    /// Smallest adjustment any value in this group can contribute.
    fn min_adjustment(&self) -> i64 {
        self.values
            .iter()
            .filter_map(|v| self.price_adjustments.get(v))
            .copied()
            .min()
            .unwrap_or(0)
    }
}

/// A customer's chosen value for each option kind the product offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customization(BTreeMap<OptionKind, String>);

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: OptionKind, value: impl Into<String>) -> Self {
        self.0.insert(kind, value.into());
        self
    }

    pub fn choose(&mut self, kind: OptionKind, value: impl Into<String>) {
        self.0.insert(kind, value.into());
    }

    pub fn value(&self, kind: OptionKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKind, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// A catalog product.
///
/// `stock_level` is `None` for unbounded stock (made-to-order items);
/// `reorder_threshold` drives the admin low-stock view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price in smallest currency unit (e.g., cents).
    pub base_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub custom_options: BTreeMap<OptionKind, OptionGroup>,
    #[serde(default)]
    pub stock_level: Option<u32>,
    #[serde(default)]
    pub reorder_threshold: Option<u32>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            base_price,
            preview_image: None,
            custom_options: BTreeMap::new(),
            stock_level: None,
            reorder_threshold: None,
            is_active: true,
        }
    }

    /// Validate the record as it enters the system (catalog load, admin
    /// edits). Option groups must be internally consistent and no
    /// combination of adjustments may take the unit price below zero.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let mut floor = self.base_price as i64;
        for (kind, group) in &self.custom_options {
            if group.values.is_empty() {
                return Err(DomainError::validation(format!(
                    "option group '{kind}' has no values"
                )));
            }
            for value in &group.values {
                if !group.price_adjustments.contains_key(value) {
                    return Err(DomainError::validation(format!(
                        "option group '{kind}' is missing a price adjustment for '{value}'"
                    )));
                }
            }
            floor += group.min_adjustment();
        }

        if floor < 0 {
            return Err(DomainError::validation(
                "option adjustments can take the unit price below zero",
            ));
        }

        Ok(())
    }

    /// Unit price for a given customization, in cents: base price plus the
    /// chosen adjustment of every option group the product offers.
    ///
    /// The customization must choose exactly the kinds the product offers.
    pub fn unit_price(&self, customization: &Customization) -> DomainResult<u64> {
        let mut price = self.base_price as i64;

        for (kind, group) in &self.custom_options {
            let chosen = customization.value(*kind).ok_or_else(|| {
                DomainError::validation(format!("no '{kind}' value chosen for '{}'", self.name))
            })?;
            if !group.values.iter().any(|v| v == chosen) {
                return Err(DomainError::validation(format!(
                    "'{chosen}' is not an available '{kind}' for '{}'",
                    self.name
                )));
            }
            price += group.price_adjustments.get(chosen).copied().unwrap_or(0);
        }

        for (kind, _) in customization.iter() {
            if !self.custom_options.contains_key(&kind) {
                return Err(DomainError::validation(format!(
                    "'{}' has no '{kind}' option",
                    self.name
                )));
            }
        }

        if price < 0 {
            return Err(DomainError::validation(format!(
                "customized price of '{}' is below zero",
                self.name
            )));
        }

        Ok(price as u64)
    }

    /// Display snapshot for cart lines: what the customer saw when adding.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            preview_image: self.preview_image.clone(),
            stock_level: self.stock_level,
        }
    }
}

/// The slice of a product a cart line carries: reference plus what is needed
/// to display the line and run the optimistic capacity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub stock_level: Option<u32>,
}

/// The option groups seeded when a catalog record defines none.
pub fn default_custom_options() -> BTreeMap<OptionKind, OptionGroup> {
    BTreeMap::from([
        (
            OptionKind::Colour,
            OptionGroup::new([("Silver", 0), ("Gold", 1500), ("Rose Gold", 1000)]),
        ),
        (
            OptionKind::Size,
            OptionGroup::new([("Small", -500), ("Medium", 0), ("Large", 1000)]),
        ),
        (
            OptionKind::Material,
            OptionGroup::new([("Standard", 0), ("Premium", 2500)]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customized_product() -> Product {
        let mut product = Product::new("P001", "Engraved Pendant", 10_000);
        product.custom_options = default_custom_options();
        product
    }

    fn full_choice() -> Customization {
        Customization::new()
            .with(OptionKind::Colour, "Gold")
            .with(OptionKind::Size, "Small")
            .with(OptionKind::Material, "Premium")
    }

    #[test]
    fn unit_price_sums_base_and_adjustments() {
        let product = customized_product();
        // 10_000 + 1_500 - 500 + 2_500
        assert_eq!(product.unit_price(&full_choice()).unwrap(), 13_500);
    }

    #[test]
    fn unit_price_rejects_unknown_value() {
        let product = customized_product();
        let choice = full_choice().with(OptionKind::Colour, "Chartreuse");
        assert!(matches!(
            product.unit_price(&choice),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn unit_price_requires_every_offered_kind() {
        let product = customized_product();
        let partial = Customization::new().with(OptionKind::Colour, "Silver");
        assert!(product.unit_price(&partial).is_err());
    }

    #[test]
    fn unit_price_rejects_choice_for_kind_not_offered() {
        let product = Product::new("P002", "Gift Card", 2_500);
        let choice = Customization::new().with(OptionKind::Size, "Large");
        assert!(product.unit_price(&choice).is_err());
    }

    #[test]
    fn plain_product_prices_at_base() {
        let product = Product::new("P002", "Gift Card", 2_500);
        assert_eq!(product.unit_price(&Customization::new()).unwrap(), 2_500);
    }

    #[test]
    fn validate_rejects_value_without_adjustment() {
        let mut product = customized_product();
        product
            .custom_options
            .get_mut(&OptionKind::Colour)
            .unwrap()
            .price_adjustments
            .remove("Gold");
        assert!(matches!(
            product.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_price_floor() {
        let mut product = customized_product();
        product.base_price = 400; // Small is -500
        assert!(product.validate().is_err());
    }

    #[test]
    fn validate_accepts_consistent_product() {
        assert!(customized_product().validate().is_ok());
    }

    #[test]
    fn snapshot_carries_display_fields() {
        let mut product = customized_product();
        product.stock_level = Some(3);
        let snap = product.snapshot();
        assert_eq!(snap.id, product.id);
        assert_eq!(snap.name, "Engraved Pendant");
        assert_eq!(snap.stock_level, Some(3));
    }
}
