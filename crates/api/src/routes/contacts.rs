//! Contact endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{Contact, NewContact};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.repos.contacts.list().await?))
}

#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.repos.contacts.get(id).await?))
}

/// POST /api/contacts. An unknown `customer_id` is a 404.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewContact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let contact = state.repos.contacts.create(&req).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<NewContact>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.repos.contacts.update(id, &req).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.repos.contacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
