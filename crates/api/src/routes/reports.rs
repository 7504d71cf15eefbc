//! Report endpoints and their CSV downloads.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use common::{DayWindow, ResultLimit};
use reports::{LowStockItem, SalesTrendPoint, TopCustomer, export};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

/// Wraps rendered CSV as a file download and counts the export.
fn csv_download(report: &'static str, body: String) -> Response {
    metrics::counter!("csv_exports_total", "report" => report).increment(1);
    tracing::info!(report, bytes = body.len(), "report exported");

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{report}.csv\""),
            ),
        ],
        body,
    )
        .into_response()
}

async fn load_sales(
    state: &AppState,
    params: &ReportParams,
) -> Result<Vec<SalesTrendPoint>, ApiError> {
    let window = DayWindow::or_default(params.days, DayWindow::TREND_DEFAULT)?;
    Ok(state.reports.sales_trend(window).await?)
}

async fn load_top_customers(
    state: &AppState,
    params: &ReportParams,
) -> Result<Vec<TopCustomer>, ApiError> {
    let window = DayWindow::or_default(params.days, DayWindow::RANKING_DEFAULT)?;
    let limit = ResultLimit::or_default(params.limit, ResultLimit::REPORT_DEFAULT)?;
    Ok(state.reports.top_customers(window, limit).await?)
}

/// GET /api/reports/sales?days=N (default 7)
#[tracing::instrument(skip(state))]
pub async fn sales(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Result<Json<Vec<SalesTrendPoint>>, ApiError> {
    Ok(Json(load_sales(&state, &params).await?))
}

#[tracing::instrument(skip(state))]
pub async fn sales_export(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Result<Response, ApiError> {
    let points = load_sales(&state, &params).await?;
    Ok(csv_download("sales", export::sales_trend_csv(&points)?))
}

/// GET /api/reports/top-customers?days=N&limit=M (defaults 365 and 10)
#[tracing::instrument(skip(state))]
pub async fn top_customers(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Result<Json<Vec<TopCustomer>>, ApiError> {
    Ok(Json(load_top_customers(&state, &params).await?))
}

#[tracing::instrument(skip(state))]
pub async fn top_customers_export(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> Result<Response, ApiError> {
    let customers = load_top_customers(&state, &params).await?;
    Ok(csv_download("top-customers", export::top_customers_csv(&customers)?))
}

/// GET /api/reports/low-stock: products strictly below their reorder level.
#[tracing::instrument(skip(state))]
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LowStockItem>>, ApiError> {
    Ok(Json(state.reports.low_stock().await?))
}

#[tracing::instrument(skip(state))]
pub async fn low_stock_export(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let items = state.reports.low_stock().await?;
    Ok(csv_download("low-stock", export::low_stock_csv(&items)?))
}
