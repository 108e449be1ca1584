//! # Catalog Routes
//!
//! Stock, product, and branch mutations. These endpoints mirror the
//! simulation store's command set so both persistence modes expose the same
//! operations:
//!
//! - `PUT /api/stock` — absolute upsert of one stock row
//! - `POST /api/products` / `DELETE /api/products/{id}`
//! - `POST /api/branches` / `DELETE /api/branches/{id}`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use nimbus_core::validation::{validate_name, validate_price_cents, validate_sku};
use nimbus_core::{Branch, Product};
use nimbus_db::Database;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStockRequest {
    pub product_id: String,
    pub branch_id: String,
    /// Absolute quantity, not a delta. Negative values are accepted.
    pub quantity: i64,
}

/// `PUT /api/stock`
pub async fn set_stock(
    State(db): State<Database>,
    Json(request): Json<SetStockRequest>,
) -> Result<StatusCode, ApiError> {
    db.catalog()
        .set_stock(&request.product_id, &request.branch_id, request.quantity)
        .await?;
    Ok(StatusCode::OK)
}

/// `POST /api/products`
pub async fn add_product(
    State(db): State<Database>,
    Json(product): Json<Product>,
) -> Result<StatusCode, ApiError> {
    validate_sku(&product.sku)?;
    validate_name("name", &product.name)?;
    validate_price_cents(product.price_cents)?;

    db.catalog().insert_product(&product).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /api/products/{id}`
///
/// Cascades removal of the product's stock rows at every branch.
pub async fn delete_product(
    State(db): State<Database>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    db.catalog().delete_product(&product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/branches`
pub async fn add_branch(
    State(db): State<Database>,
    Json(branch): Json<Branch>,
) -> Result<StatusCode, ApiError> {
    validate_name("name", &branch.name)?;

    db.catalog().insert_branch(&branch).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /api/branches/{id}`
///
/// Rejected with 409 while users reference the branch; on success cascades
/// the branch's stock rows. Sale history is retained.
pub async fn delete_branch(
    State(db): State<Database>,
    Path(branch_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    db.catalog().delete_branch(&branch_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
