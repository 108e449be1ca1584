//! # Sync Error Types
//!
//! The error surface callers of the gateway see.
//!
//! ## Propagation Policy
//! Every failure is TERMINAL for the action that triggered it: there is no
//! retry machinery, no error boundary, no partial application. The typed
//! variants exist for logging and tests; to a caller each failure is one
//! message string attached to the action it aborted.

use thiserror::Error;

use nimbus_core::CoreError;
use nimbus_store::StoreError;

/// Gateway operation errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Login email matched no user (local lookup or remote 401).
    #[error("No user found for {0}")]
    UserNotFound(String),

    /// The acting user has no branch to sell from.
    #[error("User {0} has no branch to sell from")]
    NoBranch(String),

    /// A checkout-session rule was violated (insufficient stock, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A local store command was rejected.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The remote endpoint could not be reached at all.
    ///
    /// The caller's optimistic local state is now unsynced with the server;
    /// nothing here re-syncs it.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The remote endpoint answered with a failure status.
    ///
    /// For sale submission the server rolls its transaction back entirely,
    /// but this client only sees the status and message; it neither knows
    /// nor verifies the rollback.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Configuration was invalid at startup.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport(err.to_string())
    }
}

/// Result type for gateway operations.
pub type SyncResult<T> = Result<T, SyncError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SyncError::UserNotFound("ghost@nimbuspos.dev".to_string());
        assert_eq!(err.to_string(), "No user found for ghost@nimbuspos.dev");

        let err = SyncError::Server {
            status: 500,
            message: "sale rejected".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): sale rejected");
    }

    #[test]
    fn test_store_error_passes_through() {
        let err: SyncError = StoreError::not_found("Product", "p9").into();
        assert_eq!(err.to_string(), "Product not found: p9");
    }
}
