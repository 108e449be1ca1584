//! # Mutation Commands
//!
//! Every mutation of the database is an explicit, serializable command
//! object applied through [`crate::Store::apply`].
//!
//! ## Why Commands?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Command Objects                                    │
//! │                                                                         │
//! │  Caller ──► Command::RecordSale(sale) ──► Store::apply ──► snapshot    │
//! │                      │                                                  │
//! │                      └──► tracing log / audit line / wire payload      │
//! │                                                                         │
//! │  • One enum lists everything that can change the database              │
//! │  • Each application is one atomic step with one log line               │
//! │  • The remote backend maps the same commands onto HTTP endpoints,      │
//! │    so both persistence modes speak an identical mutation vocabulary    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no command for editing a sale: the sale log is
//! append-only.

use serde::{Deserialize, Serialize};

use nimbus_core::{Branch, Product, Sale};

/// A single database mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    /// Append a completed sale to the log and decrement its line items'
    /// stock rows at the sale's branch.
    RecordSale(Sale),

    /// Upsert one stock row to an absolute quantity (not a delta).
    /// Negative quantities are accepted.
    #[serde(rename_all = "camelCase")]
    SetStock {
        product_id: String,
        branch_id: String,
        quantity: i64,
    },

    /// Add a product to the catalog. Rejected on duplicate SKU.
    AddProduct(Product),

    /// Remove a product and cascade-delete its stock rows.
    #[serde(rename_all = "camelCase")]
    RemoveProduct { product_id: String },

    /// Add a branch.
    AddBranch(Branch),

    /// Remove a branch and cascade-delete its stock rows. Rejected while
    /// any user references the branch; sales history is retained.
    #[serde(rename_all = "camelCase")]
    RemoveBranch { branch_id: String },
}

impl Command {
    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::RecordSale(_) => "record_sale",
            Command::SetStock { .. } => "set_stock",
            Command::AddProduct(_) => "add_product",
            Command::RemoveProduct { .. } => "remove_product",
            Command::AddBranch(_) => "add_branch",
            Command::RemoveBranch { .. } => "remove_branch",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
