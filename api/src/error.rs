//! Unified error types for the catalog API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `RemoteApiError`: restful-api.dev client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::ProductId;

/// Domain layer errors - business rules and local persistence
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(String),
}

/// Errors from the external product API (restful-api.dev)
#[derive(Debug, Error)]
pub enum RemoteApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Remote product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Remote(#[from] RemoteApiError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error is a validation failure (raised before any side effect).
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Domain(DomainError::Validation(_)))
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Domain(DomainError::AlreadyExists(_)) => StatusCode::CONFLICT,
            AppError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Remote(RemoteApiError::ProductNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Remote(e) => {
                tracing::error!("Remote API error: {}", e);
                StatusCode::BAD_GATEWAY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Raw message only; backtraces never reach the response body.
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
