//! # Store Error Types
//!
//! Error types for snapshot store and blob operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  fs / serde_json error                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SyncError (nimbus-sync) ← What the caller sees                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the snapshot.
    ///
    /// ## When This Occurs
    /// - Deleting a product or branch by an unknown id
    /// - Resolving a login email with no matching user
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A branch cannot be removed while users still reference it.
    ///
    /// This is the application-layer referential-integrity check; the
    /// snapshot itself has no constraints.
    #[error("Branch {branch_id} still has {user_count} assigned user(s)")]
    BranchInUse { branch_id: String, user_count: usize },

    /// A product with this SKU already exists.
    #[error("Duplicate SKU: '{sku}' already exists")]
    DuplicateSku { sku: String },

    /// Blob file could not be read or written.
    #[error("Blob I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Blob contents could not be encoded or decoded.
    #[error("Blob serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Branch", "b9");
        assert_eq!(err.to_string(), "Branch not found: b9");

        let err = StoreError::BranchInUse {
            branch_id: "b1".to_string(),
            user_count: 2,
        };
        assert_eq!(err.to_string(), "Branch b1 still has 2 assigned user(s)");
    }
}
