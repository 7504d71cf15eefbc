//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{NewOrder, NewOrderItem, Order, OrderStatus, OrderWithItems, UpdateOrder};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub order: NewOrder,
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
    /// Quotation the order was converted from. Overrides `order.quotation_id`.
    #[serde(default)]
    pub quotation: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status: String,
}

// -- Handlers --

/// GET /api/orders
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.repos.orders.list().await?))
}

/// GET /api/orders/{id}: the order with its items.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<OrderWithItems>, ApiError> {
    Ok(Json(state.repos.orders.get_with_items(id).await?))
}

/// POST /api/orders: creates the order and every item atomically.
#[tracing::instrument(skip(state, req), fields(customer_id = req.order.customer_id, items = req.items.len()))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), ApiError> {
    let CreateOrderRequest {
        mut order,
        items,
        quotation,
    } = req;
    if quotation.is_some() {
        order.quotation_id = quotation;
    }

    let created = state
        .repos
        .orders
        .create_order_with_items(&order, &items)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/orders/{id}: replaces header fields. Status is not touched.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateOrder>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.repos.orders.update(id, &req).await?))
}

/// POST /api/orders/{id}/status: guarded status transition.
///
/// Unknown statuses and transitions the guard refuses are both a 400.
#[tracing::instrument(skip(state))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let status: OrderStatus = req.status.parse()?;
    Ok(Json(state.repos.orders.update_order_status(id, status).await?))
}

/// DELETE /api/orders/{id}: removes the order and its items.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.repos.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
