//! End-to-end tests for the `orders/create` webhook.
//!
//! Each test serves the full app (routes, middleware, panic handling) on a
//! local port and delivers real HTTP requests to it.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use phone_sync_integration_tests::{
    Failure, InMemoryDirectory, TestServer, WEBHOOK_SECRET, order_payload,
};
use reqwest::StatusCode;
use serde_json::{Value, json};

const CUSTOMER_ID: u64 = 207_119_551;
const PHONE: &str = "+15551234567";

async fn setup(stored_phone: Option<&str>) -> (Arc<InMemoryDirectory>, TestServer) {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.insert(CUSTOMER_ID, stored_phone).await;
    let server = TestServer::start(directory.clone()).await;
    (directory, server)
}

// ============================================================================
// Signature Verification
// ============================================================================

#[tokio::test]
async fn test_valid_delivery_syncs_phone() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json["message"],
        json!(format!("Successfully synced phone {PHONE} to customer {CUSTOMER_ID}"))
    );
    assert_eq!(json["result"]["success"], json!(true));
    assert_eq!(json["result"]["customerId"], json!(CUSTOMER_ID));
    assert_eq!(json["result"]["orderId"], json!(450_789_469));
    assert_eq!(json["result"]["phoneNumber"], json!(PHONE));
    assert!(json["result"].get("error").is_none());
    assert_eq!(directory.phone(CUSTOMER_ID).await.as_deref(), Some(PHONE));
}

#[tokio::test]
async fn test_wrong_secret_is_rejected_without_calls() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server
        .deliver_signed(&body, "0f1e2d3c4b5a69788796a5b4c3d2e1f0")
        .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json, json!({"error": "Invalid signature"}));
    assert_eq!(directory.reads(), 0);
    assert_eq!(directory.writes(), 0);
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver(&body, None).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_reserialized_body_is_rejected() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();
    let signature = phone_sync_server::webhook::sign(body.as_bytes(), WEBHOOK_SECRET);
    let pretty = serde_json::to_string_pretty(&order_payload(Some(CUSTOMER_ID), Some(PHONE)))
        .unwrap();

    let resp = server.deliver(&pretty, Some(&signature)).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_unconfigured_secret_rejects_everything() {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.insert(CUSTOMER_ID, None).await;
    let server = TestServer::start_with_secret(None, directory.clone()).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, "").await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(directory.reads(), 0);
}

// ============================================================================
// Acknowledged Outcomes
// ============================================================================

#[tokio::test]
async fn test_order_without_customer_is_skipped() {
    let (directory, server) = setup(None).await;
    let body = order_payload(None, Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "message": "Order received but phone sync not needed",
            "orderId": 450_789_469
        })
    );
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_blank_shipping_phone_is_skipped() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some("  ")).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], json!("Order received but phone sync not needed"));
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_redelivery_writes_once() {
    let (directory, server) = setup(None).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let first = server.deliver_signed(&body, WEBHOOK_SECRET).await;
    let second = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    let json: Value = second.json().await.unwrap();
    assert_eq!(json["result"]["success"], json!(true));
    assert_eq!(
        json["message"],
        json!(format!(
            "Customer {CUSTOMER_ID} already has phone {PHONE} - No update needed"
        ))
    );
    assert_eq!(directory.reads(), 2);
    assert_eq!(directory.writes(), 1);
}

#[tokio::test]
async fn test_directory_failure_is_acknowledged() {
    let (directory, server) = setup(None).await;
    directory.fail_with(Failure::Write);
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], json!("Failed to sync phone for order 1001"));
    assert_eq!(json["result"]["success"], json!(false));
    assert_eq!(json["result"]["phoneNumber"], json!(PHONE));
    assert_eq!(
        json["result"]["error"],
        json!("API error: 422 - phone is invalid")
    );
    assert_eq!(directory.phone(CUSTOMER_ID).await, None);
}

#[tokio::test]
async fn test_unknown_customer_is_acknowledged() {
    let directory = Arc::new(InMemoryDirectory::new());
    let server = TestServer::start(directory.clone()).await;
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["result"]["success"], json!(false));
    assert_eq!(directory.writes(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_acknowledged() {
    let (directory, server) = setup(None).await;
    let body = "{\"id\": 450789469, \"order_number\":";

    let resp = server.deliver_signed(body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], json!("Webhook received but processing failed"));
    assert!(json["error"].is_string());
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_large_signed_order_is_acknowledged() {
    let (directory, server) = setup(None).await;
    let mut payload = order_payload(Some(CUSTOMER_ID), Some(PHONE));
    payload["note"] = json!("x".repeat(3 * 1024 * 1024));
    let body = payload.to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["result"]["success"], json!(true));
    assert_eq!(directory.phone(CUSTOMER_ID).await.as_deref(), Some(PHONE));
}

#[tokio::test]
async fn test_null_customer_id_is_skipped() {
    let (directory, server) = setup(None).await;
    let mut payload = order_payload(Some(CUSTOMER_ID), Some(PHONE));
    payload["customer"]["id"] = Value::Null;
    let body = payload.to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "message": "Order received but phone sync not needed",
            "orderId": 450_789_469
        })
    );
    assert_eq!(directory.reads(), 0);
}

#[tokio::test]
async fn test_panic_is_acknowledged() {
    let (directory, server) = setup(None).await;
    directory.fail_with(Failure::Panic);
    let body = order_payload(Some(CUSTOMER_ID), Some(PHONE)).to_string();

    let resp = server.deliver_signed(&body, WEBHOOK_SECRET).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({
            "message": "Webhook received but processing failed",
            "error": "directory exploded"
        })
    );
}

// ============================================================================
// Other Routes
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (_, server) = setup(None).await;

    let resp = server
        .client
        .get(server.url("/webhooks/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], json!("healthy"));
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let (_, server) = setup(None).await;

    let resp = server.client.get(server.url("/")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], json!("running"));
    assert_eq!(
        json["endpoints"],
        json!({"health": "/webhooks/health", "webhook": "/webhooks/orders/create"})
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (_, server) = setup(None).await;

    let resp = server
        .client
        .post(server.url("/webhooks/orders/paid"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        json!({"error": "Not Found", "path": "/webhooks/orders/paid"})
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (_, server) = setup(None).await;

    let resp = server
        .client
        .get(server.url("/webhooks/health"))
        .header("x-request-id", "req-abc123")
        .send()
        .await
        .unwrap();

    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "req-abc123"
    );
}
