//! # Error Types
//!
//! Domain-specific error types for nimbus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nimbus-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nimbus-store errors (separate crate)                                  │
//! │  └── StoreError       - Snapshot/blob operation failures               │
//! │                                                                         │
//! │  nimbus-sync errors (separate crate)                                   │
//! │  └── SyncError        - What the UI layer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → SyncError → caller   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient branch stock to add or increment a cart line.
    ///
    /// ## When This Occurs
    /// - Adding a product whose available quantity (on hand minus what the
    ///   cart already holds) is zero or less
    /// - Incrementing a line past the branch's on-hand quantity
    ///
    /// ## User Workflow
    /// ```text
    /// Click product tile
    ///      │
    ///      ▼
    /// available = on_hand - in_cart = 0
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "LAP-001", available: 0, requested: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough LAP-001 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// The cart has no line for the given product.
    ///
    /// Returned by quantity adjustment; removing an absent line is a no-op.
    #[error("Product {0} is not in the cart")]
    NotInCart(String),

    /// A sale cannot be built for a session without a branch.
    ///
    /// Cashiers and managers always carry a home branch; only Admin users
    /// have none, and an Admin ringing a sale must pick a branch first.
    #[error("User {0} has no branch to sell from")]
    NoBranch(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email or SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "LAP-001".to_string(),
            available: 0,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for LAP-001: available 0, requested 1"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::Duplicate {
            field: "sku".to_string(),
            value: "LAP-001".to_string(),
        };
        assert_eq!(err.to_string(), "sku 'LAP-001' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
