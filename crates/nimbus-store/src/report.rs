//! # Reporting Aggregates
//!
//! Read-only aggregates over a snapshot: the numbers behind the dashboard
//! cards and the branch-filtered sale history. Pure functions; rendering is
//! someone else's problem.

use serde::Serialize;

use nimbus_core::{Money, Sale, Snapshot, LOW_STOCK_THRESHOLD};

/// Revenue total for one branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSales {
    pub branch_id: String,
    pub branch_name: String,
    pub total_cents: i64,
}

/// Units sold for one product, for the top-sellers card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub product_name: String,
    pub units_sold: i64,
}

/// The dashboard numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of all sale totals.
    pub total_revenue_cents: i64,
    /// Number of sales in the log.
    pub order_count: usize,
    /// Stock rows below [`LOW_STOCK_THRESHOLD`].
    pub low_stock_count: usize,
    /// Revenue per branch, in branch-list order.
    pub sales_by_branch: Vec<BranchSales>,
    /// Products by units sold, descending, top five.
    pub top_products: Vec<ProductSales>,
}

impl DashboardStats {
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

/// Computes the dashboard aggregates for a snapshot.
pub fn dashboard_stats(snapshot: &Snapshot) -> DashboardStats {
    let total_revenue_cents = snapshot.sales.iter().map(|s| s.total_cents).sum();

    let low_stock_count = snapshot
        .stock
        .iter()
        .filter(|s| s.quantity < LOW_STOCK_THRESHOLD)
        .count();

    let sales_by_branch = snapshot
        .branches
        .iter()
        .map(|branch| BranchSales {
            branch_id: branch.id.clone(),
            branch_name: branch.name.clone(),
            total_cents: snapshot
                .sales
                .iter()
                .filter(|s| s.branch_id == branch.id)
                .map(|s| s.total_cents)
                .sum(),
        })
        .collect();

    let mut top_products: Vec<ProductSales> = snapshot
        .products
        .iter()
        .map(|product| ProductSales {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            units_sold: snapshot
                .sales
                .iter()
                .flat_map(|s| &s.items)
                .filter(|i| i.product_id == product.id)
                .map(|i| i.quantity)
                .sum(),
        })
        .collect();
    top_products.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    top_products.truncate(5);

    DashboardStats {
        total_revenue_cents,
        order_count: snapshot.sales.len(),
        low_stock_count,
        sales_by_branch,
        top_products,
    }
}

/// Sale history filtered by branch (`None` = all branches), preserving the
/// log's most-recent-first order.
pub fn sales_for_branch<'a>(snapshot: &'a Snapshot, branch_id: Option<&str>) -> Vec<&'a Sale> {
    snapshot
        .sales
        .iter()
        .filter(|s| branch_id.map_or(true, |b| s.branch_id == b))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::{PaymentMethod, SaleItem};

    fn sale(id: &str, branch_id: &str, product_id: &str, qty: i64, unit: i64) -> Sale {
        Sale {
            id: id.to_string(),
            branch_id: branch_id.to_string(),
            cashier_id: "u3".to_string(),
            total_cents: qty * unit,
            payment_method: PaymentMethod::Cash,
            created_at: chrono::Utc::now(),
            items: vec![SaleItem {
                id: format!("{id}-i0"),
                sale_id: id.to_string(),
                product_id: product_id.to_string(),
                quantity: qty,
                unit_price_cents: unit,
                subtotal_cents: qty * unit,
            }],
        }
    }

    fn snapshot_with_sales() -> Snapshot {
        let mut snapshot = Snapshot::seed();
        // Prepend like the store does: s3 is most recent
        snapshot.sales.insert(0, sale("s1", "b1", "p1", 2, 120000));
        snapshot.sales.insert(0, sale("s2", "b2", "p4", 1, 8900));
        snapshot.sales.insert(0, sale("s3", "b1", "p2", 3, 4500));
        snapshot
    }

    #[test]
    fn test_dashboard_totals() {
        let stats = dashboard_stats(&snapshot_with_sales());

        assert_eq!(stats.order_count, 3);
        assert_eq!(stats.total_revenue_cents, 240000 + 8900 + 13500);
        assert_eq!(stats.total_revenue(), Money::from_cents(262400));
    }

    #[test]
    fn test_dashboard_low_stock() {
        // Every seeded stock row starts at 5 or more
        let seed = Snapshot::seed();
        assert_eq!(dashboard_stats(&seed).low_stock_count, 0);

        let mut snapshot = seed;
        snapshot.stock[0].quantity = 3; // p1 @ b1 drops below threshold
        assert_eq!(dashboard_stats(&snapshot).low_stock_count, 1);
    }

    #[test]
    fn test_sales_by_branch() {
        let stats = dashboard_stats(&snapshot_with_sales());
        let b1 = stats
            .sales_by_branch
            .iter()
            .find(|b| b.branch_id == "b1")
            .unwrap();
        let b2 = stats
            .sales_by_branch
            .iter()
            .find(|b| b.branch_id == "b2")
            .unwrap();

        assert_eq!(b1.total_cents, 240000 + 13500);
        assert_eq!(b2.total_cents, 8900);
    }

    #[test]
    fn test_top_products_descending() {
        let stats = dashboard_stats(&snapshot_with_sales());
        assert_eq!(stats.top_products[0].product_id, "p2"); // 3 units
        assert_eq!(stats.top_products[0].units_sold, 3);
        assert_eq!(stats.top_products[1].product_id, "p1"); // 2 units
    }

    #[test]
    fn test_sales_for_branch_filter() {
        let snapshot = snapshot_with_sales();

        let all = sales_for_branch(&snapshot, None);
        assert_eq!(all.len(), 3);
        // Log order preserved: most recent first
        assert_eq!(all[0].id, "s3");

        let b1 = sales_for_branch(&snapshot, Some("b1"));
        assert_eq!(b1.len(), 2);
        assert!(b1.iter().all(|s| s.branch_id == "b1"));
    }
}
