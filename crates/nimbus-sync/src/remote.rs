//! # Remote Backend
//!
//! Persistence over HTTP against the Nimbus POS server.
//!
//! ## Request Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   RemoteBackend Request Model                           │
//! │                                                                         │
//! │  login ──────────────► POST /api/login            {email}              │
//! │  RecordSale ─────────► POST /api/sales            Sale (with items)    │
//! │  SetStock ───────────► PUT  /api/stock            {productId, ...}     │
//! │  AddProduct ─────────► POST /api/products         Product              │
//! │  RemoveProduct ──────► DELETE /api/products/{id}                        │
//! │  AddBranch ──────────► POST /api/branches         Branch               │
//! │  RemoveBranch ───────► DELETE /api/branches/{id}                        │
//! │  snapshot ───────────► GET  /api/snapshot                               │
//! │                                                                         │
//! │  One independent request per call. No batching, no cross-call          │
//! │  transaction, no retry/backoff: a failure surfaces once and leaves     │
//! │  the caller's optimistic state unsynced until it re-fetches.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sale endpoint is transactional ON THE SERVER (insert + stock
//! decrements commit or roll back together); this client only ever sees a
//! status code.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use async_trait::async_trait;

use nimbus_core::{Snapshot, User};
use nimbus_store::Command;

use crate::error::{SyncError, SyncResult};
use crate::gateway::Persistence;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: User,
}

/// The server's error body shape: `{ "error": "message" }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extracts a displayable message from a failure body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => "request failed".to_string(),
    }
}

// =============================================================================
// Remote Backend
// =============================================================================

/// Remote-mode persistence backend.
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteBackend {
    /// Creates a backend against a server base URL
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemoteBackend {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to a [`SyncError::Server`].
    async fn fail(response: reqwest::Response) -> SyncError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(status, %message, "Server rejected request");
        SyncError::Server { status, message }
    }
}

#[async_trait]
impl Persistence for RemoteBackend {
    async fn login(&self, email: &str) -> SyncResult<User> {
        debug!(%email, "POST /api/login");
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&LoginRequest { email })
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(SyncError::UserNotFound(email.to_string())),
            status if status.is_success() => {
                let body: LoginResponse = response.json().await?;
                Ok(body.user)
            }
            _ => Err(Self::fail(response).await),
        }
    }

    async fn apply(&self, command: Command) -> SyncResult<()> {
        debug!(op = command.name(), "Submitting command");

        let response = match &command {
            Command::RecordSale(sale) => {
                self.client
                    .post(self.url("/api/sales"))
                    .json(sale)
                    .send()
                    .await?
            }
            Command::SetStock { .. } => {
                // The command's own wire shape carries productId/branchId/quantity
                self.client
                    .put(self.url("/api/stock"))
                    .json(&command)
                    .send()
                    .await?
            }
            Command::AddProduct(product) => {
                self.client
                    .post(self.url("/api/products"))
                    .json(product)
                    .send()
                    .await?
            }
            Command::RemoveProduct { product_id } => {
                self.client
                    .delete(self.url(&format!("/api/products/{product_id}")))
                    .send()
                    .await?
            }
            Command::AddBranch(branch) => {
                self.client
                    .post(self.url("/api/branches"))
                    .json(branch)
                    .send()
                    .await?
            }
            Command::RemoveBranch { branch_id } => {
                self.client
                    .delete(self.url(&format!("/api/branches/{branch_id}")))
                    .send()
                    .await?
            }
        };

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::fail(response).await)
        }
    }

    async fn snapshot(&self) -> SyncResult<Snapshot> {
        debug!("GET /api/snapshot");
        let response = self.client.get(self.url("/api/snapshot")).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::fail(response).await)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let backend = RemoteBackend::new("http://localhost:3000/");
        assert_eq!(backend.url("/api/login"), "http://localhost:3000/api/login");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"error":"no such user"}"#), "no such user");
        assert_eq!(error_message("plain text"), "plain text");
        assert_eq!(error_message(""), "request failed");
    }

    #[test]
    fn test_login_request_wire_shape() {
        let json = serde_json::to_string(&LoginRequest {
            email: "alice@nimbuspos.dev",
        })
        .unwrap();
        assert_eq!(json, r#"{"email":"alice@nimbuspos.dev"}"#);
    }
}
