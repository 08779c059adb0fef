//! Unified error handling for the HTTP surface.
//!
//! Webhook processing failures are deliberately NOT errors here: they are
//! acknowledged with 200 so Shopify does not retry. Only failed
//! authentication and unknown routes produce error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Webhook signature missing or invalid.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No route matched the request path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": reason }))).into_response()
            }
            Self::NotFound(path) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not Found", "path": path })),
            )
                .into_response(),
        }
    }
}
