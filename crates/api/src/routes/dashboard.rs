//! Dashboard summary endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::DayWindow;
use reports::DashboardSummary;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub days: Option<i64>,
}

/// GET /api/dashboard?days=N (default 7)
#[tracing::instrument(skip(state))]
pub async fn summary(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DashboardParams>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let window = DayWindow::or_default(params.days, DayWindow::TREND_DEFAULT)?;
    Ok(Json(state.reports.dashboard(window).await?))
}
