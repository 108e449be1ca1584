//! # Checkout Session (Cart)
//!
//! The in-progress cart a cashier builds at the terminal, and the checkout
//! step that turns it into an immutable [`Sale`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Operations                          │
//! │                                                                         │
//! │  Terminal Action           Cart Operation            State Change       │
//! │  ───────────────           ──────────────            ────────────       │
//! │                                                                         │
//! │  Click product ──────────► add_line() ─────────────► qty += 1          │
//! │                            (soft stock check)                           │
//! │  +/- buttons ────────────► adjust_quantity() ──────► qty = max(1, ..)  │
//! │                                                                         │
//! │  Remove button ──────────► remove_line() ──────────► line dropped      │
//! │                                                                         │
//! │  Charge button ──────────► checkout() ─────────────► Sale built,       │
//! │                                                      cart cleared      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Soft Stock Check
//! `add_line` checks `on_hand - already_in_cart` at click time but reserves
//! nothing: two sessions against the same stock row are not mutually
//! exclusive, and `checkout` does NOT re-validate availability. The recorder
//! decrements without a floor, so the check/commit window can drive stock
//! negative. That window is inherited behavior, preserved and documented
//! rather than fixed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product, Sale, SaleItem};

// =============================================================================
// Cart Line
// =============================================================================

/// One product line in the cart.
///
/// ## Price Freezing
/// The whole product record is copied in when the line is first added, so
/// the line keeps displaying (and eventually sells at) the price the cashier
/// saw, even if the catalog row changes underneath the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product data at time of adding (frozen).
    pub product: Product,

    /// Quantity in cart; always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Line subtotal in cents (unit price × quantity).
    #[inline]
    pub fn subtotal_cents(&self) -> i64 {
        self.product.price_cents * self.quantity
    }

    /// Line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The checkout session.
///
/// ## Invariants
/// - Lines are unique by product id (re-adding increments quantity)
/// - Every quantity is >= 1 (decrementing floors at 1; use `remove_line`)
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Read access to the lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of unique product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Quantity of one product already in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Adds one unit of a product to the cart.
    ///
    /// `on_hand` is the branch's current stock for this product (a missing
    /// stock row is zero). The unit is accepted only while
    /// `on_hand - quantity_of(product) > 0`; otherwise the cart is left
    /// unchanged and [`CoreError::InsufficientStock`] is returned.
    ///
    /// This is a soft validation: nothing is reserved, and availability is
    /// not re-checked at checkout.
    pub fn add_line(&mut self, product: &Product, on_hand: i64) -> CoreResult<()> {
        let in_cart = self.quantity_of(&product.id);
        let available = on_hand - in_cart;
        if available <= 0 {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available,
                requested: 1,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Drops a line entirely. Removing an absent line is a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Adjusts a line's quantity by a signed delta.
    ///
    /// ## Behavior
    /// - The new quantity floors at 1: decrementing never removes the line
    ///   (that is what `remove_line` is for)
    /// - A positive delta that would push the quantity past `on_hand` is
    ///   rejected and the line is left unchanged
    /// - An unknown product id returns [`CoreError::NotInCart`]
    pub fn adjust_quantity(
        &mut self,
        product_id: &str,
        delta: i64,
        on_hand: i64,
    ) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or_else(|| CoreError::NotInCart(product_id.to_string()))?;

        let new_quantity = (line.quantity + delta).max(1);
        if delta > 0 && new_quantity > on_hand {
            return Err(CoreError::InsufficientStock {
                sku: line.product.sku.clone(),
                available: on_hand,
                requested: new_quantity,
            });
        }

        line.quantity = new_quantity;
        Ok(())
    }

    /// Subtotal over all lines in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal_cents()).sum()
    }

    /// Subtotal as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Tax for the session. There is no tax model: always zero, displayed
    /// as such on the terminal and receipts.
    pub fn tax(&self) -> Money {
        Money::zero()
    }

    /// Grand total (subtotal + tax, and tax is always zero).
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    /// Grand total in cents.
    pub fn total_cents(&self) -> i64 {
        self.total().cents()
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Converts the session into a [`Sale`] and clears the cart.
    ///
    /// Returns `None` on an empty cart (checkout is a no-op). Otherwise the
    /// sale gets a fresh UUID, the current UTC timestamp, and one
    /// [`SaleItem`] per line with the line's frozen unit price. Availability
    /// is NOT re-checked here; see the module docs for the check/commit
    /// window this leaves open.
    pub fn checkout(
        &mut self,
        payment_method: PaymentMethod,
        branch_id: &str,
        cashier_id: &str,
    ) -> Option<Sale> {
        if self.lines.is_empty() {
            return None;
        }

        let sale_id = Uuid::new_v4().to_string();
        let items: Vec<SaleItem> = self
            .lines
            .iter()
            .map(|line| SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                product_id: line.product.id.clone(),
                quantity: line.quantity,
                unit_price_cents: line.product.price_cents,
                subtotal_cents: line.subtotal_cents(),
            })
            .collect();

        let sale = Sale {
            id: sale_id,
            branch_id: branch_id.to_string(),
            cashier_id: cashier_id.to_string(),
            total_cents: items.iter().map(|i| i.subtotal_cents).sum(),
            payment_method,
            created_at: chrono::Utc::now(),
            items,
        };

        self.clear();
        Some(sale)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Totals summary for terminal display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    /// Always zero; kept explicit so receipts state it.
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal_cents(),
            tax_cents: cart.tax().cents(),
            total_cents: cart.total_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            category_id: "c1".to_string(),
            price_cents,
            image_url: None,
        }
    }

    #[test]
    fn test_add_line_increments_quantity() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        cart.add_line(&product, 10).unwrap();
        cart.add_line(&product, 10).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_add_line_blocked_when_nothing_available() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        // No stock row means zero on hand
        let err = cart.add_line(&product, 0).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_line_accounts_for_cart_contents() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        // Two on hand: third add must be rejected, cart unchanged
        cart.add_line(&product, 2).unwrap();
        cart.add_line(&product, 2).unwrap();
        let err = cart.add_line(&product, 2).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 0,
                requested: 1,
                ..
            }
        ));
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_adjust_quantity_floors_at_one() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        cart.add_line(&product, 10).unwrap();
        cart.adjust_quantity("p1", -5, 10).unwrap();

        // Cannot reach zero by decrementing
        assert_eq!(cart.quantity_of("p1"), 1);
    }

    #[test]
    fn test_adjust_quantity_rejects_increment_past_stock() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        cart.add_line(&product, 2).unwrap();
        cart.add_line(&product, 2).unwrap();
        let err = cart.adjust_quantity("p1", 1, 2).unwrap_err();

        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        // Line left unchanged
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_adjust_quantity_missing_row_counts_as_zero() {
        let mut cart = Cart::new();
        let product = test_product("p3", 2500);

        // Seeded one line despite zero stock elsewhere; increments against a
        // missing stock row (on_hand = 0) are rejected
        cart.lines.push(CartLine {
            product,
            quantity: 1,
        });
        assert!(cart.adjust_quantity("p3", 1, 0).is_err());
        assert_eq!(cart.quantity_of("p3"), 1);
    }

    #[test]
    fn test_adjust_unknown_product() {
        let mut cart = Cart::new();
        let err = cart.adjust_quantity("nope", 1, 10).unwrap_err();
        assert!(matches!(err, CoreError::NotInCart(_)));
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        let product = test_product("p1", 120000);

        cart.add_line(&product, 10).unwrap();
        cart.remove_line("p1");
        assert!(cart.is_empty());

        // Removing an absent line is a no-op
        cart.remove_line("p1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        // Laptop $1,200.00 x2 plus mouse $45.00 x1 => $2,445.00, tax zero
        let mut cart = Cart::new();
        let laptop = test_product("p1", 120000);
        let mouse = test_product("p2", 4500);

        cart.add_line(&laptop, 10).unwrap();
        cart.adjust_quantity("p1", 1, 10).unwrap();
        cart.add_line(&mouse, 50).unwrap();

        assert_eq!(cart.total_cents(), 244500);
        assert_eq!(cart.tax(), Money::zero());
        assert_eq!(format!("{}", cart.total()), "$2445.00");

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, 244500);
    }

    #[test]
    fn test_checkout_empty_cart_is_noop() {
        let mut cart = Cart::new();
        assert!(cart
            .checkout(PaymentMethod::Cash, "b1", "u3")
            .is_none());
    }

    #[test]
    fn test_checkout_builds_sale_and_clears_cart() {
        let mut cart = Cart::new();
        let laptop = test_product("p1", 120000);
        let mouse = test_product("p2", 4500);

        cart.add_line(&laptop, 10).unwrap();
        cart.adjust_quantity("p1", 1, 10).unwrap();
        cart.add_line(&mouse, 50).unwrap();

        let sale = cart
            .checkout(PaymentMethod::Card, "b1", "u3")
            .expect("non-empty cart must produce a sale");

        assert!(cart.is_empty());
        assert_eq!(sale.branch_id, "b1");
        assert_eq!(sale.cashier_id, "u3");
        assert_eq!(sale.payment_method, PaymentMethod::Card);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.total_cents, 244500);

        // Totals invariant: every subtotal is qty × unit price, and the
        // sale total is the sum of subtotals
        for item in &sale.items {
            assert_eq!(item.subtotal_cents, item.quantity * item.unit_price_cents);
            assert_eq!(item.sale_id, sale.id);
        }
        assert_eq!(sale.items_total_cents(), sale.total_cents);

        // Item order follows cart line order
        assert_eq!(sale.items[0].product_id, "p1");
        assert_eq!(sale.items[0].quantity, 2);
        assert_eq!(sale.items[1].product_id, "p2");
        assert_eq!(sale.items[1].quantity, 1);
    }
}
