//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::WindowError;
use domain::DomainError;
use reports::ReportError;
use store::StoreError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body, path, or query string.
    #[error("{0}")]
    BadRequest(String),

    /// Input rejected by domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Repository failure, classified by kind.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Report query or export failure.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Domain(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DuplicateKey | StoreError::Referenced(_) => StatusCode::CONFLICT,
                StoreError::Invalid(_) | StoreError::InvalidTransition(_) => {
                    StatusCode::BAD_REQUEST
                }
                StoreError::Database(_) | StoreError::Migration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal server error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<WindowError> for ApiError {
    fn from(err: WindowError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
