//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Service banner
//!
//! # Webhooks (Shopify)
//! GET  /webhooks/health          - Health check
//! POST /webhooks/orders/create   - Sync shipping phone to customer
//! ```
//!
//! Anything else is a JSON 404.

use axum::{Json, Router, http::Uri, response::IntoResponse, routing::get};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

pub mod webhooks;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/webhooks", webhooks::router())
        .fallback(not_found)
}

/// Service banner listing the public endpoints.
async fn index() -> impl IntoResponse {
    Json(json!({
        "name": "Shopify Phone Sync",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/webhooks/health",
            "webhook": "/webhooks/orders/create",
        },
    }))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
