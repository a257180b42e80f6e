//! The persisted set of read notification identities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identity strings of notifications the customer has read.
///
/// Serializes as a plain JSON array of strings - the shape the per-customer
/// client slot stores. Identities are deterministic functions of the order,
/// so the set stays meaningful across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadSet(BTreeSet<String>);

impl ReadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity; returns `false` when it was already present
    /// (marking twice is a no-op).
    pub fn insert(&mut self, identity: impl Into<String>) -> bool {
        self.0.insert(identity.into())
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.0.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = ReadSet::new();
        assert!(set.insert("order:1:Confirmed"));
        assert!(!set.insert("order:1:Confirmed"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("order:1:Confirmed"));
    }

    #[test]
    fn serializes_as_json_array() {
        let mut set = ReadSet::new();
        set.insert("order:2:Packed");
        set.insert("shipment:2");

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["order:2:Packed","shipment:2"]"#);

        let restored: ReadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn iterates_in_sorted_order() {
        let mut set = ReadSet::new();
        set.insert("shipment:9");
        set.insert("order:9:Shipped");

        let identities: Vec<&str> = set.iter().collect();
        assert_eq!(identities, vec!["order:9:Shipped", "shipment:9"]);
    }
}
