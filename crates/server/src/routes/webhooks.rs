//! Shopify webhook handlers.
//!
//! Every delivery that passes signature verification is acknowledged with
//! 200, even when processing fails. Shopify retries any non-2xx response with
//! backoff, and deliveries are not deduplicated by webhook ID, so failures are
//! reported in the response body and logs instead of via status code. A 401
//! for a bad signature is the only non-200 outcome.

use std::any::Any;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use phone_sync_core::{Order, OrderId, SyncOutcome, should_sync};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{Span, error, info, instrument};

use crate::error::AppError;
use crate::state::AppState;
use crate::webhook::{self, HMAC_HEADER};

const PROCESSING_FAILED: &str = "Webhook received but processing failed";
const SYNC_NOT_NEEDED: &str = "Order received but phone sync not needed";

/// Largest `orders/create` body accepted. Well above axum's 2 MB default,
/// which large orders (many line items, long notes) can exceed.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Create webhook routes (nested under `/webhooks`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/orders/create",
            post(orders_create).layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY_BYTES)),
        )
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(acknowledge_panic))
}

// =============================================================================
// Response Bodies
// =============================================================================

/// Acknowledgment for an order that carries nothing to sync.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSkippedResponse {
    pub message: &'static str,
    pub order_id: OrderId,
}

/// Acknowledgment carrying the outcome of a sync attempt.
#[derive(Debug, Serialize)]
pub struct SyncAttemptedResponse {
    pub message: String,
    pub result: SyncOutcome,
}

/// Acknowledgment for a delivery that could not be processed.
#[derive(Debug, Serialize)]
pub struct ProcessingFailedResponse {
    pub message: &'static str,
    pub error: String,
}

impl ProcessingFailedResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            message: PROCESSING_FAILED,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle the `orders/create` webhook.
///
/// The body is taken as raw bytes so the HMAC is computed over exactly what
/// Shopify sent; JSON parsing happens only after verification.
#[instrument(
    skip_all,
    fields(shop = tracing::field::Empty, webhook_id = tracing::field::Empty)
)]
async fn orders_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let metadata = webhook::extract_metadata(&headers);
    let span = Span::current();
    if let Some(shop) = &metadata.shop {
        span.record("shop", shop.as_str());
    }
    if let Some(webhook_id) = &metadata.webhook_id {
        span.record("webhook_id", webhook_id.as_str());
    }
    info!(
        topic = ?metadata.topic,
        api_version = ?metadata.api_version,
        "Received orders/create webhook"
    );

    let signature = webhook::header_str(&headers, HMAC_HEADER).unwrap_or_default();
    if !webhook::verify(&body, signature, state.webhook_secret()) {
        error!("Invalid webhook signature");
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    let order: Order = match serde_json::from_slice(&body) {
        Ok(order) => order,
        Err(e) => {
            error!(error = %e, "Error processing orders/create webhook");
            return Ok(Json(ProcessingFailedResponse::new(e.to_string())).into_response());
        }
    };

    info!(
        order_id = %order.id,
        order_number = order.order_number,
        customer_id = ?order.customer_id(),
        has_shipping_phone = order.has_shipping_phone(),
        "Processing order"
    );

    if !should_sync(&order) {
        info!(
            order_number = order.order_number,
            "Order does not require phone sync"
        );
        return Ok(Json(SyncSkippedResponse {
            message: SYNC_NOT_NEEDED,
            order_id: order.id,
        })
        .into_response());
    }

    let result = state.phone_sync().sync_phone(&order).await;

    Ok(Json(SyncAttemptedResponse {
        message: result.message.clone(),
        result,
    })
    .into_response())
}

/// Health check endpoint. Does not check dependencies.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Turn a handler panic into a 200 acknowledgment.
#[allow(clippy::needless_pass_by_value)] // Signature required by CatchPanicLayer
fn acknowledge_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    error!(error = %detail, "Error processing webhook");

    Json(ProcessingFailedResponse::new(detail)).into_response()
}
