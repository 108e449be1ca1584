//! # Snapshot Blob Persistence
//!
//! Simulation mode persists the ENTIRE database as one JSON file with a
//! fixed name, rewritten after every successful mutation and decoded once
//! at startup.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Blob Lifecycle                                     │
//! │                                                                         │
//! │  Startup                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  load_or_seed() ──► file exists? decode it : Snapshot::seed()          │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  every Store::apply success ──► save(snapshot) ──► rewrite whole file  │
//! │                                                                         │
//! │  The file IS the export artifact: download it, review it, feed it to  │
//! │  the nimbus-db seed binary to populate a real database.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rewriting the whole blob per mutation is obviously not a scalable
//! database; it is the faithful local stand-in for one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use nimbus_core::{Snapshot, SNAPSHOT_FILE_NAME};

use crate::error::StoreResult;

/// Handle to the on-disk snapshot blob.
#[derive(Debug, Clone)]
pub struct BlobStore {
    path: PathBuf,
}

impl BlobStore {
    /// Creates a blob store inside the given data directory.
    ///
    /// The file name is fixed ([`SNAPSHOT_FILE_NAME`]); only the directory
    /// is configurable.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        BlobStore {
            path: data_dir.as_ref().join(SNAPSHOT_FILE_NAME),
        }
    }

    /// Path of the blob file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot if the blob exists.
    pub fn load(&self) -> StoreResult<Option<Snapshot>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No blob on disk");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let snapshot = Snapshot::from_json(&json)?;
        info!(
            path = %self.path.display(),
            sales = snapshot.sales.len(),
            products = snapshot.products.len(),
            "Loaded snapshot blob"
        );
        Ok(Some(snapshot))
    }

    /// Loads the snapshot, falling back to the seed dataset on first run.
    ///
    /// The seed is written back immediately so the file exists from the
    /// first launch onward.
    pub fn load_or_seed(&self) -> StoreResult<Snapshot> {
        if let Some(snapshot) = self.load()? {
            return Ok(snapshot);
        }

        info!(path = %self.path.display(), "First run: seeding snapshot");
        let snapshot = Snapshot::seed();
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Writes the whole snapshot to disk, replacing the previous blob.
    pub fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(snapshot)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), sales = snapshot.sales.len(), "Saved snapshot blob");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::store::Store;

    #[test]
    fn test_load_missing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let blob = BlobStore::new(dir.path());
        assert!(blob.load().unwrap().is_none());
    }

    #[test]
    fn test_load_or_seed_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let blob = BlobStore::new(dir.path());

        let snapshot = blob.load_or_seed().unwrap();
        assert_eq!(snapshot, Snapshot::seed());
        assert!(blob.path().exists());

        // Second call reads the file instead of reseeding
        let again = blob.load_or_seed().unwrap();
        assert_eq!(again, snapshot);
    }

    #[test]
    fn test_save_load_round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let blob = BlobStore::new(dir.path());

        // Mutate a seeded store so the snapshot has sales and changed stock
        let mut store = Store::seeded();
        let mut cart = nimbus_core::Cart::new();
        let laptop = store.product_by_id("p1").unwrap().clone();
        cart.add_line(&laptop, store.stock_on_hand("p1", "b1")).unwrap();
        let first = cart
            .checkout(nimbus_core::PaymentMethod::Cash, "b1", "u3")
            .unwrap();
        cart.add_line(&laptop, store.stock_on_hand("p1", "b1")).unwrap();
        let second = cart
            .checkout(nimbus_core::PaymentMethod::Card, "b1", "u3")
            .unwrap();
        store.apply(Command::RecordSale(first)).unwrap();
        store.apply(Command::RecordSale(second.clone())).unwrap();

        blob.save(store.snapshot()).unwrap();
        let restored = blob.load().unwrap().unwrap();

        // Identical collections, and sale order (most-recent-first) intact
        assert_eq!(&restored, store.snapshot());
        assert_eq!(restored.sales[0].id, second.id);
    }

    #[test]
    fn test_export_format_matches_blob_format() {
        let dir = tempfile::tempdir().unwrap();
        let blob = BlobStore::new(dir.path());
        let snapshot = blob.load_or_seed().unwrap();

        // The export artifact decodes to the same snapshot the blob holds
        let export = snapshot.to_json_pretty().unwrap();
        assert_eq!(Snapshot::from_json(&export).unwrap(), snapshot);
    }
}
