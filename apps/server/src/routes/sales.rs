//! # Sale Submission Route
//!
//! `POST /api/sales` — records a sale transactionally.
//!
//! The endpoint's whole contract is all-or-nothing: the sale header, its
//! items, and every stock decrement commit together or not at all. Any
//! failure rolls the transaction back and surfaces as a generic 500; the
//! client learns nothing more and is expected to re-initiate if it wants to
//! retry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

use nimbus_core::Sale;
use nimbus_db::Database;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub sale_id: String,
}

/// `POST /api/sales`
pub async fn submit_sale(
    State(db): State<Database>,
    Json(sale): Json<Sale>,
) -> Result<(StatusCode, Json<SaleResponse>), ApiError> {
    let sale_id = sale.id.clone();

    if let Err(err) = db.sales().insert_sale(&sale).await {
        // Per the endpoint contract every failure is a generic 500; the
        // detail goes to the log, the transaction is already rolled back.
        error!(%sale_id, %err, "Sale submission failed, transaction rolled back");
        return Err(ApiError::internal("Sale submission failed"));
    }

    Ok((StatusCode::CREATED, Json(SaleResponse { sale_id })))
}
