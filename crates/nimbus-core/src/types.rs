//! # Domain Types
//!
//! Core domain types used throughout Nimbus POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  sku (business) │   │  branch_id      │   │  email (login)  │       │
//! │  │  category_id    │   │  cashier_id     │   │  role           │       │
//! │  │  price_cents    │   │  total_cents    │   │  branch_id?     │       │
//! │  └─────────────────┘   │  items[]        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockLevel    │   │     Branch      │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id  ┐  │   │  id             │   │  Cash           │       │
//! │  │  branch_id   ┘key│  │  name           │   │  Card           │       │
//! │  │  quantity       │   │  location       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entity ids are UUID-v4 strings. Seeded demo rows keep short readable ids
//! (`b1`, `p1`, ...) so fixtures stay legible; nothing in the system parses
//! an id beyond equality.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Branch
// =============================================================================

/// A physical retail location with its own stock levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Unique identifier.
    pub id: String,

    /// Display name shown in the branch switcher and on reports.
    pub name: String,

    /// Street address or mall unit.
    pub location: String,
}

// =============================================================================
// User & Role
// =============================================================================

/// The role a user acts under.
///
/// Roles are closed: there is no per-user permission editing. What a role
/// may do is the static capability table in [`crate::capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Headquarters: full access, no home branch.
    Admin,
    /// Branch management: dashboards, inventory, reports.
    Manager,
    /// Terminal operation only.
    Cashier,
}

/// A user who can sign in to the system.
///
/// Identity is resolved by exact email match; there is no credential check
/// anywhere in this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub name: String,

    /// Login identifier. Matched exactly (case-sensitive).
    pub email: String,

    pub role: Role,

    /// Home branch. `None` only for Admin (headquarters).
    pub branch_id: Option<String>,
}

// =============================================================================
// Category
// =============================================================================

/// A flat product category (no hierarchy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the terminal and on receipts.
    pub name: String,

    /// Stock Keeping Unit - business identifier, unique across the catalog.
    pub sku: String,

    /// Category this product belongs to.
    pub category_id: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Optional product image for the terminal grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// On-hand quantity of one product at one branch.
///
/// ## Semantics
/// - `(product_id, branch_id)` is the composite key: one row per pair
/// - A missing row means zero on hand
/// - Quantity is signed: the recorder decrements without a floor, so a
///   check/commit race can drive it negative (documented behavior, not a bug
///   to be fixed here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: String,
    pub branch_id: String,
    pub quantity: i64,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
}

// =============================================================================
// Sale & Sale Item
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern: the unit price is frozen at sale time and the
/// subtotal is computed once at creation. Neither is ever recomputed, so a
/// later catalog price change cannot rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price, computed at creation.
    pub subtotal_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// A completed sale transaction.
///
/// Sales are an append-only log: created once at checkout, never mutated or
/// deleted through any exposed interface. The log is kept most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// Branch the sale was rung at.
    pub branch_id: String,
    /// User who rang the sale.
    pub cashier_id: String,
    /// Grand total in cents; equals the sum of item subtotals at creation.
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    /// Ordered line items.
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Sum of the line subtotals.
    ///
    /// Equals `total_cents` for every sale built by the checkout session;
    /// kept separate so tests and audits can assert the invariant.
    pub fn items_total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.subtotal_cents).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&Role::Cashier).unwrap(),
            "\"CASHIER\""
        );
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CASH\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).unwrap(),
            "\"CARD\""
        );
    }

    #[test]
    fn test_sale_items_total() {
        let sale = Sale {
            id: "s1".into(),
            branch_id: "b1".into(),
            cashier_id: "u3".into(),
            total_cents: 244500,
            payment_method: PaymentMethod::Cash,
            created_at: Utc::now(),
            items: vec![
                SaleItem {
                    id: "i1".into(),
                    sale_id: "s1".into(),
                    product_id: "p1".into(),
                    quantity: 2,
                    unit_price_cents: 120000,
                    subtotal_cents: 240000,
                },
                SaleItem {
                    id: "i2".into(),
                    sale_id: "s1".into(),
                    product_id: "p2".into(),
                    quantity: 1,
                    unit_price_cents: 4500,
                    subtotal_cents: 4500,
                },
            ],
        };

        assert_eq!(sale.items_total_cents(), sale.total_cents);
        assert_eq!(sale.total(), Money::from_cents(244500));
    }

    #[test]
    fn test_product_field_names_are_camel_case() {
        let product = Product {
            id: "p1".into(),
            name: "Laptop Pro X".into(),
            sku: "LAP-001".into(),
            category_id: "c1".into(),
            price_cents: 120000,
            image_url: None,
        };
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"categoryId\""));
        assert!(json.contains("\"priceCents\""));
    }
}
