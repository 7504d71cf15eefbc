//! Quotation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{NewQuotation, NewQuotationItem, Quotation, QuotationWithItems};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::orders::StatusRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuotationRequest {
    pub quotation: NewQuotation,
    #[serde(default)]
    pub items: Vec<NewQuotationItem>,
}

#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Quotation>>, ApiError> {
    Ok(Json(state.repos.quotations.list().await?))
}

#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<QuotationWithItems>, ApiError> {
    Ok(Json(state.repos.quotations.get_with_items(id).await?))
}

/// POST /api/quotations: header defaults are filled before insert.
#[tracing::instrument(skip(state, req), fields(customer_id = req.quotation.customer_id, items = req.items.len()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationWithItems>), ApiError> {
    let created = state
        .repos
        .quotations
        .create_quotation_with_items(&req.quotation, &req.items)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<NewQuotation>,
) -> Result<Json<Quotation>, ApiError> {
    Ok(Json(state.repos.quotations.update(id, &req).await?))
}

/// POST /api/quotations/{id}/status: any non-empty status is accepted.
#[tracing::instrument(skip(state))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> Result<Json<Quotation>, ApiError> {
    Ok(Json(state.repos.quotations.update_status(id, &req.status).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.repos.quotations.delete_quotation_with_items(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
