//! # Identity Resolution
//!
//! Resolves a login email to a user record. That is the entire
//! authentication model: an exact, case-sensitive string match against the
//! known user set. No password, no token, no session state.
//!
//! The remote mode delegates the same lookup to the server's `/api/login`
//! query and trusts its response.

use nimbus_core::User;

/// Resolves an email to a user, or `None` if no exact match exists.
///
/// ## Example
/// ```rust
/// use nimbus_core::Snapshot;
/// use nimbus_store::identity::resolve;
///
/// let snapshot = Snapshot::seed();
/// assert!(resolve(&snapshot.users, "alice@nimbuspos.dev").is_some());
/// assert!(resolve(&snapshot.users, "ALICE@nimbuspos.dev").is_none()); // case matters
/// ```
pub fn resolve<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}

// =============================================================================
// Unit Tests
// =============================================================================
