//! # Login Route
//!
//! `POST /api/login` — resolves an email to a user record.
//!
//! This is the entire authentication surface: an exact-match lookup. A miss
//! is a 401; there are no passwords, tokens, or sessions.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use nimbus_core::User;
use nimbus_db::Database;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

/// `POST /api/login`
pub async fn login(
    State(db): State<Database>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = db
        .users()
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(format!("No user found for {}", request.email)))?;

    info!(user_id = %user.id, role = ?user.role, "Login resolved");
    Ok(Json(LoginResponse { user }))
}
