//! # Database Snapshot
//!
//! The whole-database value: every entity collection in one serializable
//! struct. This is simultaneously
//!
//! 1. the in-memory database of simulation mode,
//! 2. the on-disk blob format (one JSON file, rewritten after each mutation),
//! 3. the export artifact used to seed a real database, and
//! 4. the payload of the server's `GET /api/snapshot`.
//!
//! ## Ordering Guarantees
//! `sales` is most-recent-first; serialization preserves the order, so an
//! export/import round trip reproduces the log exactly.
//!
//! ## What This Is Not
//! A mutation surface. Nothing outside `nimbus-store` should reach into a
//! snapshot and edit collections in place; mutations go through the store's
//! command objects so every change is explicit and auditable.

use serde::{Deserialize, Serialize};

use crate::types::{Branch, Category, Product, Role, Sale, StockLevel, User};

/// Fixed file name for the persisted simulation-mode blob.
pub const SNAPSHOT_FILE_NAME: &str = "nimbus_database.json";

/// Full database snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub users: Vec<User>,
    pub branches: Vec<Branch>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub stock: Vec<StockLevel>,
    /// Append-only sale log, most-recent-first.
    pub sales: Vec<Sale>,
}

impl Snapshot {
    /// An entirely empty database.
    pub fn empty() -> Self {
        Snapshot::default()
    }

    /// The demo dataset loaded on first run: two branches, four users across
    /// the three roles, a small catalog, and opening stock.
    pub fn seed() -> Self {
        Snapshot {
            users: vec![
                User {
                    id: "u1".into(),
                    name: "Admin User".into(),
                    email: "admin@nimbuspos.dev".into(),
                    role: Role::Admin,
                    branch_id: None,
                },
                User {
                    id: "u2".into(),
                    name: "John Manager".into(),
                    email: "john@nimbuspos.dev".into(),
                    role: Role::Manager,
                    branch_id: Some("b1".into()),
                },
                User {
                    id: "u3".into(),
                    name: "Alice Cashier".into(),
                    email: "alice@nimbuspos.dev".into(),
                    role: Role::Cashier,
                    branch_id: Some("b1".into()),
                },
                User {
                    id: "u4".into(),
                    name: "Bob Cashier".into(),
                    email: "bob@nimbuspos.dev".into(),
                    role: Role::Cashier,
                    branch_id: Some("b2".into()),
                },
            ],
            branches: vec![
                Branch {
                    id: "b1".into(),
                    name: "Downtown Branch".into(),
                    location: "123 Main St".into(),
                },
                Branch {
                    id: "b2".into(),
                    name: "Westside Mall".into(),
                    location: "456 Shopping Blvd".into(),
                },
            ],
            categories: vec![
                Category {
                    id: "c1".into(),
                    name: "Electronics".into(),
                },
                Category {
                    id: "c2".into(),
                    name: "Apparel".into(),
                },
                Category {
                    id: "c3".into(),
                    name: "Home & Kitchen".into(),
                },
            ],
            products: vec![
                Product {
                    id: "p1".into(),
                    name: "Laptop Pro X".into(),
                    sku: "LAP-001".into(),
                    category_id: "c1".into(),
                    price_cents: 120000,
                    image_url: Some("https://picsum.photos/seed/laptop/200".into()),
                },
                Product {
                    id: "p2".into(),
                    name: "Wireless Mouse".into(),
                    sku: "MOU-002".into(),
                    category_id: "c1".into(),
                    price_cents: 4500,
                    image_url: Some("https://picsum.photos/seed/mouse/200".into()),
                },
                Product {
                    id: "p3".into(),
                    name: "Cotton T-Shirt".into(),
                    sku: "TSH-003".into(),
                    category_id: "c2".into(),
                    price_cents: 2500,
                    image_url: Some("https://picsum.photos/seed/shirt/200".into()),
                },
                Product {
                    id: "p4".into(),
                    name: "Coffee Maker".into(),
                    sku: "COF-004".into(),
                    category_id: "c3".into(),
                    price_cents: 8900,
                    image_url: Some("https://picsum.photos/seed/coffee/200".into()),
                },
            ],
            stock: vec![
                StockLevel {
                    product_id: "p1".into(),
                    branch_id: "b1".into(),
                    quantity: 10,
                },
                StockLevel {
                    product_id: "p2".into(),
                    branch_id: "b1".into(),
                    quantity: 50,
                },
                StockLevel {
                    product_id: "p1".into(),
                    branch_id: "b2".into(),
                    quantity: 5,
                },
                StockLevel {
                    product_id: "p4".into(),
                    branch_id: "b2".into(),
                    quantity: 12,
                },
            ],
            sales: vec![],
        }
    }

    /// On-hand quantity of a product at a branch. A missing row is zero.
    pub fn stock_on_hand(&self, product_id: &str, branch_id: &str) -> i64 {
        self.stock
            .iter()
            .find(|s| s.product_id == product_id && s.branch_id == branch_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    /// Looks up a product by id.
    pub fn product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Serializes the snapshot as the export artifact.
    ///
    /// Pretty-printed so the dump is reviewable before it seeds a real
    /// database; structurally identical to the persisted blob.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot from its JSON form (blob or export).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let snapshot = Snapshot::seed();
        assert_eq!(snapshot.branches.len(), 2);
        assert_eq!(snapshot.users.len(), 4);
        assert_eq!(snapshot.categories.len(), 3);
        assert_eq!(snapshot.products.len(), 4);
        assert_eq!(snapshot.stock.len(), 4);
        assert!(snapshot.sales.is_empty());
    }

    #[test]
    fn test_stock_on_hand_missing_row_is_zero() {
        let snapshot = Snapshot::seed();
        assert_eq!(snapshot.stock_on_hand("p1", "b1"), 10);
        // p3 has no stock row anywhere
        assert_eq!(snapshot.stock_on_hand("p3", "b1"), 0);
        // unknown branch
        assert_eq!(snapshot.stock_on_hand("p1", "b9"), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = Snapshot::seed();
        let json = snapshot.to_json_pretty().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
