//! # Local Backend (Simulation Mode)
//!
//! Persistence against the in-process [`Store`], with the whole snapshot
//! rewritten to the JSON blob after every successful mutation.
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   LocalBackend::apply(command)                          │
//! │                                                                         │
//! │  optional latency sleep                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock store ──► Store::apply(command) ──► BlobStore::save(snapshot)    │
//! │       │                   │                                             │
//! │       │                   └── rejected? blob untouched, error up       │
//! │       ▼                                                                 │
//! │  unlock                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex makes each command application atomic, but nothing links a
//! cart's add-time stock check to its later RecordSale: the check/commit
//! window stays open on purpose (see the store's module docs).

use tokio::sync::Mutex;
use tracing::debug;

use async_trait::async_trait;

use nimbus_core::{Snapshot, User};
use nimbus_store::{BlobStore, Command, Store};

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::gateway::Persistence;

/// Simulation-mode persistence backend.
pub struct LocalBackend {
    store: Mutex<Store>,
    blob: BlobStore,
    latency: Option<std::time::Duration>,
}

impl LocalBackend {
    /// Opens the blob in the configured data directory, seeding on first run.
    pub fn open(config: &SyncConfig) -> SyncResult<Self> {
        let blob = BlobStore::new(&config.data_dir);
        let snapshot = blob.load_or_seed()?;
        Ok(LocalBackend {
            store: Mutex::new(Store::new(snapshot)),
            blob,
            latency: config.simulated_latency,
        })
    }

    /// Pretends to be a network: one fixed sleep per call, when configured.
    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            debug!(?latency, "Simulating network latency");
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Persistence for LocalBackend {
    async fn login(&self, email: &str) -> SyncResult<User> {
        self.simulate_latency().await;

        let store = self.store.lock().await;
        store
            .resolve_user(email)
            .cloned()
            .ok_or_else(|| SyncError::UserNotFound(email.to_string()))
    }

    async fn apply(&self, command: Command) -> SyncResult<()> {
        self.simulate_latency().await;

        let mut store = self.store.lock().await;
        store.apply(command)?;
        self.blob.save(store.snapshot())?;
        Ok(())
    }

    async fn snapshot(&self) -> SyncResult<Snapshot> {
        self.simulate_latency().await;

        let store = self.store.lock().await;
        Ok(store.snapshot().clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::Branch;

    fn open_in(dir: &std::path::Path) -> LocalBackend {
        LocalBackend::open(&SyncConfig::simulated(dir)).unwrap()
    }

    #[tokio::test]
    async fn test_every_apply_rewrites_blob() {
        let dir = tempfile::tempdir().unwrap();
        let backend = open_in(dir.path());

        backend
            .apply(Command::SetStock {
                product_id: "p3".into(),
                branch_id: "b1".into(),
                quantity: 20,
            })
            .await
            .unwrap();

        // A second backend over the same dir sees the mutation
        let reopened = open_in(dir.path());
        let snapshot = reopened.snapshot().await.unwrap();
        assert_eq!(snapshot.stock_on_hand("p3", "b1"), 20);
    }

    #[tokio::test]
    async fn test_rejected_command_leaves_blob_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let backend = open_in(dir.path());

        // b1 has assigned users: removal must fail and persist nothing
        let err = backend
            .apply(Command::RemoveBranch {
                branch_id: "b1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));

        let reopened = open_in(dir.path());
        let snapshot = reopened.snapshot().await.unwrap();
        assert!(snapshot.branches.iter().any(|b| b.id == "b1"));
    }

    #[tokio::test]
    async fn test_add_branch_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = open_in(dir.path());

        backend
            .apply(Command::AddBranch(Branch {
                id: "b3".into(),
                name: "Airport Kiosk".into(),
                location: "Terminal 2".into(),
            }))
            .await
            .unwrap();

        let snapshot = backend.snapshot().await.unwrap();
        assert!(snapshot.branches.iter().any(|b| b.id == "b3"));
    }

    #[tokio::test]
    async fn test_latency_sleep_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SyncConfig::simulated(dir.path());
        config.simulated_latency = Some(std::time::Duration::from_millis(30));
        let backend = LocalBackend::open(&config).unwrap();

        let started = std::time::Instant::now();
        backend.login("alice@nimbuspos.dev").await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(30));
    }
}
