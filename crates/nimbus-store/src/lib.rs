//! # nimbus-store: Simulation-Mode Persistence
//!
//! The in-process database for Nimbus POS simulation mode.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Simulation Mode Data Flow                        │
//! │                                                                         │
//! │  nimbus-sync LocalBackend                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    nimbus-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │    Command    │    │  BlobStore   │  │   │
//! │  │   │  (store.rs)   │◄───│ (command.rs)  │    │  (blob.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Snapshot +    │    │ RecordSale    │    │ one JSON     │  │   │
//! │  │   │ narrow reads  │    │ SetStock ...  │    │ file on disk │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────▲───────┘  │   │
//! │  │           │                                        │          │   │
//! │  │           └──────── save after every apply ────────┘          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The snapshot store and command application
//! - [`command`] - The mutation vocabulary
//! - [`blob`] - Single-file JSON persistence
//! - [`identity`] - Email → user resolution
//! - [`report`] - Dashboard and history aggregates
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod command;
pub mod error;
pub mod identity;
pub mod report;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::BlobStore;
pub use command::Command;
pub use error::{StoreError, StoreResult};
pub use report::{dashboard_stats, sales_for_branch, DashboardStats};
pub use store::Store;
