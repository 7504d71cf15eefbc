//! Stock level endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{Inventory, NewInventory, Restock, StockLevels};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Inventory>>, ApiError> {
    Ok(Json(state.repos.inventory.list().await?))
}

/// GET /api/inventory/low-stock: rows at or below their reorder level.
#[tracing::instrument(skip(state))]
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Inventory>>, ApiError> {
    Ok(Json(state.repos.inventory.low_stock().await?))
}

#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Inventory>, ApiError> {
    Ok(Json(state.repos.inventory.get(id).await?))
}

/// GET /api/products/{id}/inventory
#[tracing::instrument(skip(state))]
pub async fn for_product(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<i64>,
) -> Result<Json<Inventory>, ApiError> {
    Ok(Json(state.repos.inventory.get_by_product(product_id).await?))
}

/// POST /api/inventory. One row per product; a second row is a 409.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewInventory>,
) -> Result<(StatusCode, Json<Inventory>), ApiError> {
    let inventory = state.repos.inventory.create(&req).await?;
    Ok((StatusCode::CREATED, Json(inventory)))
}

#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(levels): ApiJson<StockLevels>,
) -> Result<Json<Inventory>, ApiError> {
    Ok(Json(state.repos.inventory.update(id, levels).await?))
}

/// POST /api/inventory/{id}/restock
#[tracing::instrument(skip(state))]
pub async fn restock(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(restock): ApiJson<Restock>,
) -> Result<Json<Inventory>, ApiError> {
    Ok(Json(state.repos.inventory.restock(id, restock).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.repos.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
