//! # The Persistence Gateway
//!
//! One interface, two storage worlds.
//!
//! ## Mode Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gateway Construction                                │
//! │                                                                         │
//! │  SyncConfig (env) ──► Gateway::connect()   ← happens ONCE at startup   │
//! │                            │                                            │
//! │          ┌─────────────────┴──────────────────┐                         │
//! │          ▼                                    ▼                         │
//! │   LocalBackend                         RemoteBackend                    │
//! │   (simulated mode)                     (remote mode)                    │
//! │                                                                         │
//! │  Callers hold a Gateway and never learn which backend answered.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Freshness Caveat (remote mode)
//! `apply` does not return updated state and the gateway keeps no cache: a
//! caller that displayed a `snapshot()` before submitting a sale is showing
//! stale stock until it fetches a new one. That drift is inherited behavior;
//! nothing here auto-refreshes.

use async_trait::async_trait;
use tracing::info;

use nimbus_core::{Cart, PaymentMethod, Sale, Snapshot, User};
use nimbus_store::Command;

use crate::config::{PersistenceMode, SyncConfig};
use crate::error::{SyncError, SyncResult};
use crate::local::LocalBackend;
use crate::remote::RemoteBackend;

// =============================================================================
// Persistence Trait
// =============================================================================

/// The storage interface both persistence modes implement.
///
/// Three calls cover the whole system: identity resolution, the mutation
/// vocabulary (as [`Command`] objects), and a full-database read.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Resolves a login email to a user record.
    async fn login(&self, email: &str) -> SyncResult<User>;

    /// Applies one mutation command.
    async fn apply(&self, command: Command) -> SyncResult<()>;

    /// Fetches the full database snapshot.
    async fn snapshot(&self) -> SyncResult<Snapshot>;
}

// =============================================================================
// Gateway
// =============================================================================

/// The application's single entry point to persistence.
pub struct Gateway {
    mode: PersistenceMode,
    backend: Box<dyn Persistence>,
}

impl Gateway {
    /// Builds the backend selected by the configuration.
    ///
    /// This is the ONLY place the mode is inspected; after construction
    /// every call is polymorphic.
    pub fn connect(config: SyncConfig) -> SyncResult<Self> {
        let mode = config.mode;
        let backend: Box<dyn Persistence> = match mode {
            PersistenceMode::Simulated => Box::new(LocalBackend::open(&config)?),
            PersistenceMode::Remote => {
                let base_url = config
                    .api_base_url
                    .clone()
                    .ok_or_else(|| SyncError::Config("remote mode needs an API URL".into()))?;
                Box::new(RemoteBackend::new(base_url))
            }
        };

        info!(?mode, "Persistence gateway connected");
        Ok(Gateway { mode, backend })
    }

    /// Wraps an already-built backend (tests, embedding).
    pub fn with_backend(mode: PersistenceMode, backend: Box<dyn Persistence>) -> Self {
        Gateway { mode, backend }
    }

    /// The mode selected at startup.
    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// Resolves a login email to a user record.
    pub async fn login(&self, email: &str) -> SyncResult<User> {
        self.backend.login(email).await
    }

    /// Applies one mutation command.
    pub async fn apply(&self, command: Command) -> SyncResult<()> {
        self.backend.apply(command).await
    }

    /// Fetches the full database snapshot.
    pub async fn snapshot(&self) -> SyncResult<Snapshot> {
        self.backend.snapshot().await
    }

    /// Runs the whole checkout flow: cart → sale → recorder.
    ///
    /// ## Behavior
    /// - An empty cart is a no-op (`Ok(None)`)
    /// - The cashier must carry a branch; Admin users without one get
    ///   [`SyncError::NoBranch`] and the cart is left intact
    /// - The cart is cleared the moment the sale is built. A failed record
    ///   does NOT restore it; resubmission is a user-initiated fresh action,
    ///   exactly one submission attempt per sale object
    pub async fn complete_sale(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        cashier: &User,
    ) -> SyncResult<Option<Sale>> {
        let branch_id = cashier
            .branch_id
            .as_deref()
            .ok_or_else(|| SyncError::NoBranch(cashier.id.clone()))?
            .to_string();

        let Some(sale) = cart.checkout(payment_method, &branch_id, &cashier.id) else {
            return Ok(None);
        };

        self.apply(Command::RecordSale(sale.clone())).await?;
        Ok(Some(sale))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_gateway(dir: &std::path::Path) -> Gateway {
        Gateway::connect(SyncConfig::simulated(dir)).unwrap()
    }

    #[tokio::test]
    async fn test_login_known_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded_gateway(dir.path());

        let user = gateway.login("alice@nimbuspos.dev").await.unwrap();
        assert_eq!(user.id, "u3");

        let err = gateway.login("ghost@nimbuspos.dev").await.unwrap_err();
        assert!(matches!(err, SyncError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_complete_sale_decrements_stock_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded_gateway(dir.path());

        let cashier = gateway.login("alice@nimbuspos.dev").await.unwrap();
        let snapshot = gateway.snapshot().await.unwrap();
        let laptop = snapshot.product_by_id("p1").unwrap().clone();
        let mouse = snapshot.product_by_id("p2").unwrap().clone();

        // Laptop x2 + mouse x1 at branch b1
        let mut cart = Cart::new();
        cart.add_line(&laptop, snapshot.stock_on_hand("p1", "b1")).unwrap();
        cart.adjust_quantity("p1", 1, snapshot.stock_on_hand("p1", "b1"))
            .unwrap();
        cart.add_line(&mouse, snapshot.stock_on_hand("p2", "b1")).unwrap();
        assert_eq!(cart.total_cents(), 244500);

        let sale = gateway
            .complete_sale(&mut cart, PaymentMethod::Cash, &cashier)
            .await
            .unwrap()
            .expect("non-empty cart records a sale");

        assert!(cart.is_empty());
        assert_eq!(sale.total_cents, 244500);
        assert_eq!(sale.items.len(), 2);

        // The store saw the decrement and the log prepend...
        let after = gateway.snapshot().await.unwrap();
        assert_eq!(after.stock_on_hand("p1", "b1"), 8);
        assert_eq!(after.stock_on_hand("p2", "b1"), 49);
        assert_eq!(after.sales[0].id, sale.id);

        // ...and a fresh gateway over the same data dir reads it back
        let reopened = seeded_gateway(dir.path());
        let reloaded = reopened.snapshot().await.unwrap();
        assert_eq!(reloaded, after);
    }

    #[tokio::test]
    async fn test_complete_sale_empty_cart_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded_gateway(dir.path());
        let cashier = gateway.login("alice@nimbuspos.dev").await.unwrap();

        let mut cart = Cart::new();
        let result = gateway
            .complete_sale(&mut cart, PaymentMethod::Card, &cashier)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(gateway.snapshot().await.unwrap().sales.is_empty());
    }

    #[tokio::test]
    async fn test_complete_sale_requires_branch() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = seeded_gateway(dir.path());

        let admin = gateway.login("admin@nimbuspos.dev").await.unwrap();
        let snapshot = gateway.snapshot().await.unwrap();
        let laptop = snapshot.product_by_id("p1").unwrap().clone();

        let mut cart = Cart::new();
        cart.add_line(&laptop, 10).unwrap();

        let err = gateway
            .complete_sale(&mut cart, PaymentMethod::Cash, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NoBranch(_)));
        // Cart untouched on this rejection
        assert_eq!(cart.line_count(), 1);
    }
}
