//! # Sale Repository
//!
//! Transactional sale recording and history reads.
//!
//! ## The Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                POST /api/sales → insert_sale()                          │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO sales ...                                                │
//! │    for each item:                                                       │
//! │      UPDATE stock SET quantity = quantity - item.quantity               │
//! │        WHERE product_id = ? AND branch_id = sale.branch_id              │
//! │      INSERT INTO sale_items ...                                         │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure → ROLLBACK: no sale row, no items, no stock change.       │
//! │  All-or-nothing is the endpoint's entire contract; the client only     │
//! │  ever learns "committed" or "failed".                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock UPDATE has no floor and touches only rows that exist, matching
//! the simulation store's recorder exactly.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use nimbus_core::{PaymentMethod, Sale, SaleItem};

use crate::error::DbResult;

/// Row shape for the sales table (items come from a second query).
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    branch_id: String,
    cashier_id: String,
    total_cents: i64,
    payment_method: PaymentMethod,
    created_at: DateTime<Utc>,
}

/// Row shape for the sale_items table.
#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    id: String,
    sale_id: String,
    product_id: String,
    quantity: i64,
    unit_price_cents: i64,
    subtotal_cents: i64,
}

impl From<SaleItemRow> for SaleItem {
    fn from(row: SaleItemRow) -> Self {
        SaleItem {
            id: row.id,
            sale_id: row.sale_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price_cents: row.unit_price_cents,
            subtotal_cents: row.subtotal_cents,
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale: header, items, and stock decrements as ONE
    /// transaction. Rolls back entirely on any failure.
    pub async fn insert_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(sale_id = %sale.id, items = sale.items.len(), "Inserting sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, branch_id, cashier_id, total_cents, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.branch_id)
        .bind(&sale.cashier_id)
        .bind(sale.total_cents)
        .bind(sale.payment_method)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            // Decrement only rows that exist; no floor at zero
            sqlx::query(
                r#"
                UPDATE stock SET quantity = quantity - ?1
                WHERE product_id = ?2 AND branch_id = ?3
                "#,
            )
            .bind(item.quantity)
            .bind(&item.product_id)
            .bind(&sale.branch_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO sale_items
                    (id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.subtotal_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            total = %sale.total(),
            items = sale.items.len(),
            "Sale committed"
        );
        Ok(())
    }

    /// Plain row inserts with NO stock decrement.
    ///
    /// Used when restoring a snapshot export: the export's stock numbers are
    /// already post-sale, so decrementing again would double-count.
    pub async fn insert_rows(&self, sale: &Sale) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, branch_id, cashier_id, total_cents, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.branch_id)
        .bind(&sale.cashier_id)
        .bind(sale.total_cents)
        .bind(sale.payment_method)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items
                    (id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.subtotal_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Sale history, most-recent-first, items attached.
    pub async fn list_recent(&self, limit: Option<i64>) -> DbResult<Vec<Sale>> {
        let query = match limit {
            Some(_) => {
                r#"
                SELECT id, branch_id, cashier_id, total_cents, payment_method, created_at
                FROM sales
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?1
                "#
            }
            None => {
                r#"
                SELECT id, branch_id, cashier_id, total_cents, payment_method, created_at
                FROM sales
                ORDER BY created_at DESC, rowid DESC
                "#
            }
        };

        let mut rows = sqlx::query_as::<_, SaleRow>(query);
        if let Some(limit) = limit {
            rows = rows.bind(limit);
        }
        let rows = rows.fetch_all(&self.pool).await?;

        let mut sales = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for(&row.id).await?;
            sales.push(Sale {
                id: row.id,
                branch_id: row.branch_id,
                cashier_id: row.cashier_id,
                total_cents: row.total_cents,
                payment_method: row.payment_method,
                created_at: row.created_at,
                items,
            });
        }

        Ok(sales)
    }

    /// Looks up one sale with its items.
    pub async fn get_by_id(&self, sale_id: &str) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, branch_id, cashier_id, total_cents, payment_method, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for(&row.id).await?;
        Ok(Some(Sale {
            id: row.id,
            branch_id: row.branch_id,
            cashier_id: row.cashier_id,
            total_cents: row.total_cents,
            payment_method: row.payment_method,
            created_at: row.created_at,
            items,
        }))
    }

    /// Items of one sale, in insertion order.
    async fn items_for(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let rows = sqlx::query_as::<_, SaleItemRow>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SaleItem::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};
    use nimbus_core::{PaymentMethod, Sale, SaleItem, Snapshot};

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.seed_snapshot(&Snapshot::seed()).await.unwrap();
        db
    }

    fn sale(id: &str, branch_id: &str, items: Vec<(&str, &str, i64, i64)>) -> Sale {
        let items: Vec<SaleItem> = items
            .into_iter()
            .map(|(item_id, product_id, quantity, unit_price_cents)| SaleItem {
                id: item_id.to_string(),
                sale_id: id.to_string(),
                product_id: product_id.to_string(),
                quantity,
                unit_price_cents,
                subtotal_cents: quantity * unit_price_cents,
            })
            .collect();
        Sale {
            id: id.to_string(),
            branch_id: branch_id.to_string(),
            cashier_id: "u3".to_string(),
            total_cents: items.iter().map(|i| i.subtotal_cents).sum(),
            payment_method: PaymentMethod::Cash,
            created_at: Utc::now(),
            items,
        }
    }

    #[tokio::test]
    async fn test_insert_sale_decrements_stock() {
        let db = seeded_db().await;

        let sale = sale(
            "s1",
            "b1",
            vec![("i1", "p1", 2, 120000), ("i2", "p2", 1, 4500)],
        );
        db.sales().insert_sale(&sale).await.unwrap();

        assert_eq!(db.catalog().stock_on_hand("p1", "b1").await.unwrap(), 8);
        assert_eq!(db.catalog().stock_on_hand("p2", "b1").await.unwrap(), 49);

        let stored = db.sales().get_by_id("s1").await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 244500);
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.items_total_cents(), stored.total_cents);
    }

    #[tokio::test]
    async fn test_insert_sale_rolls_back_entirely_on_failure() {
        let db = seeded_db().await;

        // Second item reuses the first item's primary key: the INSERT fails
        // after the header insert and one stock decrement already ran
        let bad = sale(
            "s1",
            "b1",
            vec![("i1", "p1", 2, 120000), ("i1", "p2", 1, 4500)],
        );
        assert!(db.sales().insert_sale(&bad).await.is_err());

        // Nothing persisted: no sale, no items, stock untouched
        assert!(db.sales().get_by_id("s1").await.unwrap().is_none());
        assert_eq!(db.catalog().stock_on_hand("p1", "b1").await.unwrap(), 10);
        assert_eq!(db.catalog().stock_on_hand("p2", "b1").await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_missing_stock_row_left_absent() {
        let db = seeded_db().await;

        // p3 has no stock row at b1; the sale still commits
        let sale = sale("s1", "b1", vec![("i1", "p3", 1, 2500)]);
        db.sales().insert_sale(&sale).await.unwrap();

        assert_eq!(db.catalog().stock_on_hand("p3", "b1").await.unwrap(), 0);
        assert!(db.sales().get_by_id("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let db = seeded_db().await;

        let mut first = sale("s1", "b1", vec![("i1", "p2", 1, 4500)]);
        first.created_at = Utc::now() - Duration::minutes(5);
        let second = sale("s2", "b1", vec![("i2", "p2", 1, 4500)]);

        db.sales().insert_sale(&first).await.unwrap();
        db.sales().insert_sale(&second).await.unwrap();

        let sales = db.sales().list_recent(None).await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, "s2");
        assert_eq!(sales[1].id, "s1");

        let limited = db.sales().list_recent(Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, "s2");
    }
}
