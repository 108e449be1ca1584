//! # Route Table
//!
//! The whole HTTP surface of the remote-mode backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Surface                                     │
//! │                                                                         │
//! │  POST   /api/login            exact-match email → user  (401 on miss)  │
//! │  POST   /api/sales            transactional sale insert (500 on error) │
//! │  PUT    /api/stock            absolute stock upsert                     │
//! │  POST   /api/products         add product (409 duplicate SKU)          │
//! │  DELETE /api/products/{id}    remove product + its stock rows          │
//! │  POST   /api/branches         add branch                                │
//! │  DELETE /api/branches/{id}    remove branch (409 while users remain)   │
//! │  GET    /api/snapshot         full database dump                        │
//! │  GET    /api/health           liveness probe                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod catalog;
pub mod sales;
pub mod snapshot;

use axum::routing::{delete, get, post, put};
use axum::Router;

use nimbus_db::Database;

/// Builds the application router over a database handle.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/api/health", get(snapshot::health))
        .route("/api/login", post(auth::login))
        .route("/api/sales", post(sales::submit_sale))
        .route("/api/stock", put(catalog::set_stock))
        .route("/api/products", post(catalog::add_product))
        .route("/api/products/{id}", delete(catalog::delete_product))
        .route("/api/branches", post(catalog::add_branch))
        .route("/api/branches/{id}", delete(catalog::delete_branch))
        .route("/api/snapshot", get(snapshot::dump))
        .with_state(db)
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use nimbus_core::{PaymentMethod, Sale, SaleItem, Snapshot};
    use nimbus_db::DbConfig;

    async fn seeded_router() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.seed_snapshot(&Snapshot::seed()).await.unwrap();
        (router(db.clone()), db)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn demo_sale() -> Sale {
        Sale {
            id: "s1".into(),
            branch_id: "b1".into(),
            cashier_id: "u3".into(),
            total_cents: 244500,
            payment_method: PaymentMethod::Cash,
            created_at: chrono::Utc::now(),
            items: vec![
                SaleItem {
                    id: "i1".into(),
                    sale_id: "s1".into(),
                    product_id: "p1".into(),
                    quantity: 2,
                    unit_price_cents: 120000,
                    subtotal_cents: 240000,
                },
                SaleItem {
                    id: "i2".into(),
                    sale_id: "s1".into(),
                    product_id: "p2".into(),
                    quantity: 1,
                    unit_price_cents: 4500,
                    subtotal_cents: 4500,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_login_resolves_seeded_user() {
        let (app, _db) = seeded_router().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/login",
                serde_json::json!({"email": "alice@nimbuspos.dev"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["user"]["id"], "u3");
        assert_eq!(parsed["user"]["role"], "CASHIER");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_401() {
        let (app, _db) = seeded_router().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/login",
                serde_json::json!({"email": "ghost@nimbuspos.dev"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("ghost"));
    }

    #[tokio::test]
    async fn test_submit_sale_commits_and_decrements_stock() {
        let (app, db) = seeded_router().await;

        let sale = demo_sale();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/sales",
                serde_json::to_value(&sale).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(db.catalog().stock_on_hand("p1", "b1").await.unwrap(), 8);
        assert_eq!(db.catalog().stock_on_hand("p2", "b1").await.unwrap(), 49);

        let stored = db.sales().get_by_id("s1").await.unwrap().unwrap();
        assert_eq!(stored.items_total_cents(), stored.total_cents);
    }

    #[tokio::test]
    async fn test_submit_sale_failure_is_500_and_rolls_back() {
        let (app, db) = seeded_router().await;

        // Duplicate item primary keys force a mid-transaction failure
        let mut bad = demo_sale();
        bad.items[1].id = "i1".into();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/sales",
                serde_json::to_value(&bad).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Rolled back: no sale row, stock untouched
        assert!(db.sales().get_by_id("s1").await.unwrap().is_none());
        assert_eq!(db.catalog().stock_on_hand("p1", "b1").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_set_stock_endpoint() {
        let (app, db) = seeded_router().await;

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/stock",
                serde_json::json!({"productId": "p3", "branchId": "b1", "quantity": 25}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(db.catalog().stock_on_hand("p3", "b1").await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_delete_branch_in_use_is_409() {
        let (app, db) = seeded_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/branches/b1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(db.catalog().list_branches().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_dump_round_trips() {
        let (app, db) = seeded_router().await;
        db.sales().insert_sale(&demo_sale()).await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/snapshot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let snapshot: Snapshot = serde_json::from_slice(&body).unwrap();

        assert_eq!(snapshot.products.len(), 4);
        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.sales[0].id, "s1");
        assert_eq!(snapshot.sales[0].items.len(), 2);
    }
}
