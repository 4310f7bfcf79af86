//! Error responses for route handlers
//!
//! Handlers answer failures with a fixed, route-specific message. The
//! underlying store error is logged and counted, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::StoreError;
use crate::metrics;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn from_store(err: StoreError, message: &'static str) -> Self {
        metrics::record_store_error(err.kind());

        let status = match &err {
            StoreError::Validation(_) | StoreError::Statement(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::ConnectionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status.is_server_error() {
            tracing::error!("{}: {}", message, err);
        } else {
            tracing::warn!("{}: {}", message, err);
        }

        Self { status, message }
    }
}

/// `map_err` adapter: `.map_err(reject("Failed to add item."))`
pub fn reject(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |err| ApiError::from_store(err, message)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
