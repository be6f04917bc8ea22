//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{domain::ValueObjectError, infrastructure::dto::http::ErrorDto};

/// Errors returned by HTTP handlers; all of them are client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("userId and text are required")]
    MissingFields,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValueObjectError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected request: {}", self);
        let body = ErrorDto {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
