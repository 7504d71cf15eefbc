//! Customer endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{Contact, Customer, NewCustomer, Order};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/customers
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.repos.customers.list().await?))
}

/// GET /api/customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.repos.customers.get(id).await?))
}

/// POST /api/customers
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.repos.customers.create(&req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/{id}
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.repos.customers.update(id, &req).await?))
}

/// DELETE /api/customers/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.repos.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/customers/{id}/contacts
#[tracing::instrument(skip(state))]
pub async fn contacts(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    state.repos.customers.get(id).await?;
    Ok(Json(state.repos.contacts.list_for_customer(id).await?))
}

/// GET /api/customers/{id}/orders
#[tracing::instrument(skip(state))]
pub async fn orders(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Order>>, ApiError> {
    state.repos.customers.get(id).await?;
    Ok(Json(state.repos.orders.list_for_customer(id).await?))
}
