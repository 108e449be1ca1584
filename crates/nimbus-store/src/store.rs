//! # Snapshot Store
//!
//! The simulation-mode database: a [`Snapshot`] behind narrow read accessors
//! and a single mutation entry point, [`Store::apply`].
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Mutation Flow                                │
//! │                                                                         │
//! │  Command::RecordSale ────► prepend sale ──► decrement stock rows       │
//! │  Command::SetStock ──────► upsert row to absolute quantity             │
//! │  Command::AddProduct ────► SKU uniqueness ──► push                     │
//! │  Command::RemoveProduct ─► drop product ──► cascade its stock rows     │
//! │  Command::AddBranch ─────► push                                        │
//! │  Command::RemoveBranch ──► users reference it? reject : cascade stock  │
//! │                                                                         │
//! │  Sales are never edited or deleted; the log is append-only.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Commit-Time Decrement
//! `RecordSale` decrements each matching stock row with NO floor at zero.
//! Availability was checked when the cart line was added, not here; if stock
//! moved in between, the row goes negative. A line whose (product, branch)
//! pair has no stock row leaves the table untouched. Both behaviors are
//! deliberate carries of the system this one models.

use tracing::{debug, info};

use nimbus_core::{Branch, Category, Product, Sale, Snapshot, StockLevel, User};

use crate::command::Command;
use crate::error::{StoreError, StoreResult};
use crate::identity;

/// The in-memory database for simulation mode.
///
/// Owns a [`Snapshot`] and exposes narrow per-entity reads plus command
/// application. Callers never replace or edit the snapshot wholesale.
#[derive(Debug, Clone)]
pub struct Store {
    snapshot: Snapshot,
}

impl Store {
    /// Creates a store over an existing snapshot (loaded blob or seed).
    pub fn new(snapshot: Snapshot) -> Self {
        Store { snapshot }
    }

    /// Creates a store over the demo seed data.
    pub fn seeded() -> Self {
        Store::new(Snapshot::seed())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current snapshot, for persistence and export.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn branches(&self) -> &[Branch] {
        &self.snapshot.branches
    }

    pub fn categories(&self) -> &[Category] {
        &self.snapshot.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    pub fn users(&self) -> &[User] {
        &self.snapshot.users
    }

    pub fn stock(&self) -> &[StockLevel] {
        &self.snapshot.stock
    }

    /// Sale log, most-recent-first.
    pub fn sales(&self) -> &[Sale] {
        &self.snapshot.sales
    }

    pub fn product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.snapshot.product_by_id(product_id)
    }

    /// On-hand quantity at a branch; a missing row is zero.
    pub fn stock_on_hand(&self, product_id: &str, branch_id: &str) -> i64 {
        self.snapshot.stock_on_hand(product_id, branch_id)
    }

    /// Resolves a login email to a user (exact, case-sensitive match).
    pub fn resolve_user(&self, email: &str) -> Option<&User> {
        identity::resolve(&self.snapshot.users, email)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Applies one mutation command.
    ///
    /// Either the whole command takes effect or none of it does; a rejected
    /// command leaves the snapshot exactly as it was.
    pub fn apply(&mut self, command: Command) -> StoreResult<()> {
        debug!(op = command.name(), "Applying command");

        match command {
            Command::RecordSale(sale) => self.record_sale(sale),
            Command::SetStock {
                product_id,
                branch_id,
                quantity,
            } => self.set_stock(product_id, branch_id, quantity),
            Command::AddProduct(product) => self.add_product(product),
            Command::RemoveProduct { product_id } => self.remove_product(&product_id),
            Command::AddBranch(branch) => self.add_branch(branch),
            Command::RemoveBranch { branch_id } => self.remove_branch(&branch_id),
        }
    }

    /// Prepends the sale to the log, then decrements each matching stock row.
    ///
    /// Always succeeds: there is no validation layer here, and no floor on
    /// the decrement (see module docs).
    fn record_sale(&mut self, sale: Sale) -> StoreResult<()> {
        info!(
            sale_id = %sale.id,
            branch_id = %sale.branch_id,
            total = %sale.total(),
            items = sale.items.len(),
            "Recording sale"
        );

        for item in &sale.items {
            if let Some(row) = self
                .snapshot
                .stock
                .iter_mut()
                .find(|s| s.product_id == item.product_id && s.branch_id == sale.branch_id)
            {
                row.quantity -= item.quantity;
            }
        }

        // Most-recent-first ordering
        self.snapshot.sales.insert(0, sale);
        Ok(())
    }

    /// Upserts a stock row to an absolute quantity.
    fn set_stock(&mut self, product_id: String, branch_id: String, quantity: i64) -> StoreResult<()> {
        debug!(%product_id, %branch_id, quantity, "Setting stock");

        if let Some(row) = self
            .snapshot
            .stock
            .iter_mut()
            .find(|s| s.product_id == product_id && s.branch_id == branch_id)
        {
            row.quantity = quantity;
        } else {
            self.snapshot.stock.push(StockLevel {
                product_id,
                branch_id,
                quantity,
            });
        }
        Ok(())
    }

    fn add_product(&mut self, product: Product) -> StoreResult<()> {
        if self.snapshot.products.iter().any(|p| p.sku == product.sku) {
            return Err(StoreError::DuplicateSku { sku: product.sku });
        }

        info!(product_id = %product.id, sku = %product.sku, "Adding product");
        self.snapshot.products.push(product);
        Ok(())
    }

    /// Removes a product and cascade-deletes its stock rows at every branch.
    fn remove_product(&mut self, product_id: &str) -> StoreResult<()> {
        if !self.snapshot.products.iter().any(|p| p.id == product_id) {
            return Err(StoreError::not_found("Product", product_id));
        }

        info!(%product_id, "Removing product");
        self.snapshot.products.retain(|p| p.id != product_id);
        self.snapshot.stock.retain(|s| s.product_id != product_id);
        Ok(())
    }

    fn add_branch(&mut self, branch: Branch) -> StoreResult<()> {
        info!(branch_id = %branch.id, name = %branch.name, "Adding branch");
        self.snapshot.branches.push(branch);
        Ok(())
    }

    /// Removes a branch and cascade-deletes its stock rows.
    ///
    /// Rejected while any user references the branch. Sales rung at the
    /// branch are retained: the sale log is immutable history.
    fn remove_branch(&mut self, branch_id: &str) -> StoreResult<()> {
        if !self.snapshot.branches.iter().any(|b| b.id == branch_id) {
            return Err(StoreError::not_found("Branch", branch_id));
        }

        let user_count = self
            .snapshot
            .users
            .iter()
            .filter(|u| u.branch_id.as_deref() == Some(branch_id))
            .count();
        if user_count > 0 {
            return Err(StoreError::BranchInUse {
                branch_id: branch_id.to_string(),
                user_count,
            });
        }

        info!(%branch_id, "Removing branch");
        self.snapshot.branches.retain(|b| b.id != branch_id);
        self.snapshot.stock.retain(|s| s.branch_id != branch_id);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
