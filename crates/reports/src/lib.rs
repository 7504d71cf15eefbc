//! Read-only reporting for the sales back office.
//!
//! - [`ReportService`] runs the aggregate queries behind the dashboard and
//!   the report endpoints
//! - [`export`] renders report rows as CSV
//!
//! Low stock here means `current_stock < reorder_level`. The inventory
//! listing in the `store` crate uses `<=` instead.

pub mod error;
pub mod export;
pub mod model;
pub mod service;

pub use error::{ReportError, Result};
pub use model::{DashboardSummary, LowStockItem, SalesTrendPoint, TopCustomer};
pub use service::ReportService;
