//! # Catalog Repository
//!
//! Database operations for products, branches, categories, and stock.
//!
//! ## Cascade Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Mutation Rules                               │
//! │                                                                         │
//! │  delete_product ──► delete its stock rows ──► delete the product       │
//! │                     (one transaction)                                   │
//! │                                                                         │
//! │  delete_branch ───► users assigned? ──► reject, nothing touched        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                     delete its stock rows ──► delete the branch        │
//! │                     (one transaction; sale history stays)              │
//! │                                                                         │
//! │  set_stock ───────► absolute upsert, negative values accepted          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use nimbus_core::{Branch, Category, Product, StockLevel};

use crate::error::{DbError, DbResult};

/// Row shape for the products table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    sku: String,
    name: String,
    category_id: String,
    price_cents: i64,
    image_url: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            sku: row.sku,
            category_id: row.category_id,
            price_cents: row.price_cents,
            image_url: row.image_url,
        }
    }
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// All products, in insertion order.
    pub async fn list_products(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, category_id, price_cents, image_url
            FROM products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Inserts a product. A duplicate SKU surfaces as a typed error.
    pub async fn insert_product(&self, product: &Product) -> DbResult<()> {
        debug!(product_id = %product.id, sku = %product.sku, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (id, sku, name, category_id, price_cents, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let mapped = DbError::from(err);
                if matches!(&mapped, DbError::UniqueViolation { field, .. } if field.contains("sku"))
                {
                    Err(DbError::duplicate("sku", &product.sku))
                } else {
                    Err(mapped)
                }
            }
        }
    }

    /// Deletes a product and its stock rows at every branch, atomically.
    pub async fn delete_product(&self, product_id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stock WHERE product_id = ?1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Transaction drops here, rolling back the stock delete
            return Err(DbError::not_found("Product", product_id));
        }

        tx.commit().await?;
        info!(%product_id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// All branches, in insertion order.
    pub async fn list_branches(&self) -> DbResult<Vec<Branch>> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            "SELECT id, name, location FROM branches ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, location)| Branch { id, name, location })
            .collect())
    }

    /// Inserts a branch row.
    pub async fn insert_branch(&self, branch: &Branch) -> DbResult<()> {
        debug!(branch_id = %branch.id, name = %branch.name, "Inserting branch");

        sqlx::query("INSERT INTO branches (id, name, location) VALUES (?1, ?2, ?3)")
            .bind(&branch.id)
            .bind(&branch.name)
            .bind(&branch.location)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Deletes a branch and its stock rows, atomically.
    ///
    /// Rejected while any user references the branch (the application-layer
    /// referential check). Sales rung at the branch are retained.
    pub async fn delete_branch(&self, branch_id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let user_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE branch_id = ?1")
                .bind(branch_id)
                .fetch_one(&mut *tx)
                .await?;
        if user_count > 0 {
            return Err(DbError::BranchInUse {
                branch_id: branch_id.to_string(),
                user_count,
            });
        }

        sqlx::query("DELETE FROM stock WHERE branch_id = ?1")
            .bind(branch_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM branches WHERE id = ?1")
            .bind(branch_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Branch", branch_id));
        }

        tx.commit().await?;
        info!(%branch_id, "Branch deleted");
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories, in insertion order.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, name FROM categories ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id, name)| Category { id, name }).collect())
    }

    /// Inserts a category row.
    pub async fn insert_category(&self, category: &Category) -> DbResult<()> {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?1, ?2)")
            .bind(&category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// All stock rows.
    pub async fn list_stock(&self) -> DbResult<Vec<StockLevel>> {
        let rows = sqlx::query_as::<_, (String, String, i64)>(
            "SELECT product_id, branch_id, quantity FROM stock ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(product_id, branch_id, quantity)| StockLevel {
                product_id,
                branch_id,
                quantity,
            })
            .collect())
    }

    /// Upserts one stock row to an absolute quantity.
    ///
    /// Not a delta. Negative values are accepted without complaint.
    pub async fn set_stock(
        &self,
        product_id: &str,
        branch_id: &str,
        quantity: i64,
    ) -> DbResult<()> {
        debug!(%product_id, %branch_id, quantity, "Setting stock");

        sqlx::query(
            r#"
            INSERT INTO stock (product_id, branch_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(product_id, branch_id) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(product_id)
        .bind(branch_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// On-hand quantity of a product at a branch; a missing row is zero.
    pub async fn stock_on_hand(&self, product_id: &str, branch_id: &str) -> DbResult<i64> {
        let quantity: Option<i64> = sqlx::query_scalar(
            "SELECT quantity FROM stock WHERE product_id = ?1 AND branch_id = ?2",
        )
        .bind(product_id)
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quantity.unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use nimbus_core::{Product, Snapshot};

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.seed_snapshot(&Snapshot::seed()).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_set_stock_upserts_absolute() {
        let db = seeded_db().await;
        let catalog = db.catalog();

        catalog.set_stock("p1", "b1", 99).await.unwrap();
        assert_eq!(catalog.stock_on_hand("p1", "b1").await.unwrap(), 99);

        // New row; negative accepted
        catalog.set_stock("p3", "b1", -2).await.unwrap();
        assert_eq!(catalog.stock_on_hand("p3", "b1").await.unwrap(), -2);
    }

    #[tokio::test]
    async fn test_insert_product_duplicate_sku() {
        let db = seeded_db().await;

        let dup = Product {
            id: "p9".into(),
            name: "Another Laptop".into(),
            sku: "LAP-001".into(),
            category_id: "c1".into(),
            price_cents: 99900,
            image_url: None,
        };
        let err = db.catalog().insert_product(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_product_cascades_stock() {
        let db = seeded_db().await;
        let catalog = db.catalog();

        catalog.delete_product("p1").await.unwrap();

        let products = catalog.list_products().await.unwrap();
        assert!(products.iter().all(|p| p.id != "p1"));
        // Stock rows at both branches are gone; re-fetch reads zero
        assert_eq!(catalog.stock_on_hand("p1", "b1").await.unwrap(), 0);
        assert_eq!(catalog.stock_on_hand("p1", "b2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_product_unknown_id() {
        let db = seeded_db().await;
        let err = db.catalog().delete_product("p9").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_branch_rejected_while_in_use() {
        let db = seeded_db().await;

        let err = db.catalog().delete_branch("b1").await.unwrap_err();
        assert!(matches!(err, DbError::BranchInUse { user_count: 2, .. }));

        // Branch list unchanged
        let branches = db.catalog().list_branches().await.unwrap();
        assert_eq!(branches.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_branch_cascades_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut snapshot = Snapshot::seed();
        snapshot.users.retain(|u| u.branch_id.as_deref() != Some("b2"));
        db.seed_snapshot(&snapshot).await.unwrap();

        db.catalog().delete_branch("b2").await.unwrap();

        let branches = db.catalog().list_branches().await.unwrap();
        assert!(branches.iter().all(|b| b.id != "b2"));
        let stock = db.catalog().list_stock().await.unwrap();
        assert!(stock.iter().all(|s| s.branch_id != "b2"));
    }
}
