//! `shopsphere-catalog` - the product model and the stock ledger.
//!
//! Products carry their customization option groups as a fixed-key map from
//! a closed [`OptionKind`] enum, validated when the product enters the
//! system. Stock is a plain field on the product; [`stock`] is the read-only
//! lookup layer over it.

pub mod product;
pub mod stock;

pub use product::{
    Customization, OptionGroup, OptionKind, Product, ProductSnapshot, default_custom_options,
};
pub use stock::{Availability, available_units, is_in_stock, is_low_stock};
