//! Report row types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Orders and revenue for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTrendPoint {
    pub day: NaiveDate,
    pub order_count: i64,
    pub revenue: Decimal,
}

/// A product whose stock has fallen below its reorder level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockItem {
    pub inventory_id: i64,
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    pub current_stock: i32,
    pub reorder_level: i32,
}

/// A customer ranked by spend within a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCustomer {
    pub customer_id: i64,
    pub name: String,
    pub order_count: i64,
    pub total_spent: Decimal,
}

/// Everything the dashboard shows, for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub days: i64,
    pub total_customers: i64,
    pub total_products: i64,
    pub orders_in_window: i64,
    pub revenue_in_window: Decimal,
    pub pending_orders: i64,
    pub low_stock_count: usize,
    pub sales_trend: Vec<SalesTrendPoint>,
    pub top_customers: Vec<TopCustomer>,
    pub low_stock_items: Vec<LowStockItem>,
}
