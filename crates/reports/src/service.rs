//! Aggregate report queries.

use common::{DayWindow, ResultLimit};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::model::{DashboardSummary, LowStockItem, SalesTrendPoint, TopCustomer};

/// Runs report queries against the order, customer, and inventory tables.
///
/// Cancelled orders never count towards revenue, order counts, or rankings.
#[derive(Clone)]
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_trend_point(row: PgRow) -> Result<SalesTrendPoint> {
        Ok(SalesTrendPoint {
            day: row.try_get("day")?,
            order_count: row.try_get("order_count")?,
            revenue: row.try_get("revenue")?,
        })
    }

    fn row_to_low_stock(row: PgRow) -> Result<LowStockItem> {
        Ok(LowStockItem {
            inventory_id: row.try_get("inventory_id")?,
            product_id: row.try_get("product_id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            current_stock: row.try_get("current_stock")?,
            reorder_level: row.try_get("reorder_level")?,
        })
    }

    fn row_to_top_customer(row: PgRow) -> Result<TopCustomer> {
        Ok(TopCustomer {
            customer_id: row.try_get("customer_id")?,
            name: row.try_get("name")?,
            order_count: row.try_get("order_count")?,
            total_spent: row.try_get("total_spent")?,
        })
    }

    /// One point per day for the last `window` days, today included.
    /// Days without orders are reported with zero counts.
    #[tracing::instrument(skip(self))]
    pub async fn sales_trend(&self, window: DayWindow) -> Result<Vec<SalesTrendPoint>> {
        let rows = sqlx::query(
            r#"
            SELECT d::date AS day,
                   COUNT(o.id) AS order_count,
                   COALESCE(SUM(o.total_amount), 0) AS revenue
            FROM generate_series(
                     (NOW() AT TIME ZONE 'UTC')::date - ($1::int - 1),
                     (NOW() AT TIME ZONE 'UTC')::date,
                     INTERVAL '1 day'
                 ) AS d
            LEFT JOIN orders o
                   ON (o.order_date AT TIME ZONE 'UTC')::date = d::date
                  AND o.status <> 'Cancelled'
            GROUP BY d
            ORDER BY d ASC
            "#,
        )
        .bind(window.days())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_trend_point).collect()
    }

    /// Products strictly below their reorder level (`current_stock < reorder_level`).
    #[tracing::instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<LowStockItem>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id AS inventory_id, p.id AS product_id, p.sku, p.name,
                   i.current_stock, i.reorder_level
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            WHERE i.current_stock < i.reorder_level
            ORDER BY i.current_stock ASC, i.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_low_stock).collect()
    }

    /// Customers ranked by total spent within `window`, highest first.
    #[tracing::instrument(skip(self))]
    pub async fn top_customers(
        &self,
        window: DayWindow,
        limit: ResultLimit,
    ) -> Result<Vec<TopCustomer>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id AS customer_id,
                   c.name,
                   COUNT(o.id) AS order_count,
                   COALESCE(SUM(o.total_amount), 0) AS total_spent
            FROM customers c
            JOIN orders o ON o.customer_id = c.id
            WHERE o.order_date >= NOW() - ($1::bigint * INTERVAL '1 day')
              AND o.status <> 'Cancelled'
            GROUP BY c.id, c.name
            ORDER BY total_spent DESC, c.id ASC
            LIMIT $2
            "#,
        )
        .bind(window.days())
        .bind(limit.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_top_customer).collect()
    }

    /// Builds the dashboard summary for `window`, with the top five customers.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self, window: DayWindow) -> Result<DashboardSummary> {
        let totals = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM customers) AS total_customers,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM orders
                  WHERE order_date >= NOW() - ($1::bigint * INTERVAL '1 day')
                    AND status <> 'Cancelled') AS orders_in_window,
                (SELECT COALESCE(SUM(total_amount), 0) FROM orders
                  WHERE order_date >= NOW() - ($1::bigint * INTERVAL '1 day')
                    AND status <> 'Cancelled') AS revenue_in_window,
                (SELECT COUNT(*) FROM orders WHERE status = 'Pending') AS pending_orders
            "#,
        )
        .bind(window.days())
        .fetch_one(&self.pool)
        .await?;

        let sales_trend = self.sales_trend(window).await?;
        let top_customers = self
            .top_customers(window, ResultLimit::DASHBOARD_DEFAULT)
            .await?;
        let low_stock_items = self.low_stock().await?;

        Ok(DashboardSummary {
            days: window.days(),
            total_customers: totals.try_get("total_customers")?,
            total_products: totals.try_get("total_products")?,
            orders_in_window: totals.try_get("orders_in_window")?,
            revenue_in_window: totals.try_get("revenue_in_window")?,
            pending_orders: totals.try_get("pending_orders")?,
            low_stock_count: low_stock_items.len(),
            sales_trend,
            top_customers,
            low_stock_items,
        })
    }
}
