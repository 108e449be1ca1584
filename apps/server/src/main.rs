//! # Nimbus API Server
//!
//! The HTTP backend behind remote mode.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Server Startup                                   │
//! │                                                                         │
//! │  tracing init ──► config from env ──► SQLite pool + migrations         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  empty database? ──► seed the demo dataset (optional)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum router + permissive CORS ──► serve                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;

use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nimbus_core::Snapshot;
use nimbus_db::{Database, DbConfig};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Nimbus API server");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    // Connect to the database and run migrations
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // A fresh database gets the demo dataset so login works out of the box
    if config.seed_on_start && db.users().list().await?.is_empty() {
        info!("Empty database, loading demo dataset");
        db.seed_snapshot(&Snapshot::seed()).await?;
    }

    // Browser clients call from another origin in development
    let app = routes::router(db).layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
