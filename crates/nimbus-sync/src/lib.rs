//! # nimbus-sync: Persistence Gateway
//!
//! The thin switch between simulation-mode and remote-mode persistence.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nimbus_core::{Cart, PaymentMethod};
//! use nimbus_sync::{Gateway, SyncConfig};
//!
//! # async fn run() -> Result<(), nimbus_sync::SyncError> {
//! // Mode is fixed once, from the environment
//! let gateway = Gateway::connect(SyncConfig::from_env()?)?;
//!
//! let cashier = gateway.login("alice@nimbuspos.dev").await?;
//! let snapshot = gateway.snapshot().await?;
//!
//! let mut cart = Cart::new();
//! let laptop = snapshot.product_by_id("p1").unwrap();
//! cart.add_line(laptop, snapshot.stock_on_hand("p1", "b1"))?;
//!
//! let sale = gateway
//!     .complete_sale(&mut cart, PaymentMethod::Cash, &cashier)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`gateway`] - The `Persistence` trait and the `Gateway` facade
//! - [`local`] - Simulation-mode backend (store + blob)
//! - [`remote`] - Remote-mode backend (one HTTP request per call)
//! - [`config`] - Startup configuration and mode selection
//! - [`error`] - Gateway error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod local;
pub mod remote;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{PersistenceMode, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use gateway::{Gateway, Persistence};
pub use local::LocalBackend;
pub use remote::RemoteBackend;
