//! # Snapshot & Health Routes
//!
//! - `GET /api/snapshot` — the whole database as one JSON value, in the same
//!   shape as the simulation blob and the export artifact. This is also the
//!   only re-sync mechanism a client has after an optimistic update fails.
//! - `GET /api/health` — liveness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use nimbus_core::Snapshot;
use nimbus_db::Database;

use crate::error::ApiError;

/// `GET /api/snapshot`
pub async fn dump(State(db): State<Database>) -> Result<Json<Snapshot>, ApiError> {
    let snapshot = db.dump_snapshot().await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// `GET /api/health`
pub async fn health(State(db): State<Database>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: db.health_check().await,
    })
}
