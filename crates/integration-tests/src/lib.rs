//! Integration test harness for the phone sync service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p phone-sync-integration-tests
//! ```
//!
//! No Shopify store is needed: [`InMemoryDirectory`] stands in for the
//! customer directory, and [`FakeAdminApi`] serves the same records over
//! the Admin REST routes so the real `AdminClient` can be exercised.
//!
//! # Test Categories
//!
//! - `webhooks` - Full webhook deliveries against a served app
//! - `admin_api` - The real Admin API client against the fake store

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use phone_sync_core::{Customer, CustomerId, Order, OrderId};
use phone_sync_server::shopify::{CustomerDirectory, ShopifyError};
use phone_sync_server::state::AppState;
use phone_sync_server::webhook;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Webhook secret used by every served app.
pub const WEBHOOK_SECRET: &str = "7d3f9a1c5e8b2d4f6a0c3e7b9d1f5a2c";

/// Failure to inject into [`InMemoryDirectory`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    /// Reads return a 503 API error.
    Read,
    /// Writes return a 422 API error.
    Write,
    /// Reads panic.
    Panic,
}

/// A customer directory held in memory that counts every call.
#[derive(Default)]
pub struct InMemoryDirectory {
    customers: Mutex<HashMap<CustomerId, Customer>>,
    failure: std::sync::Mutex<Failure>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a customer with the given phone.
    pub async fn insert(&self, id: u64, phone: Option<&str>) {
        let id = CustomerId::new(id);
        self.customers.lock().await.insert(
            id,
            Customer {
                id,
                email: Some(format!("customer{id}@example.com")),
                phone: phone.map(String::from),
                first_name: Some("Bob".to_string()),
                last_name: Some("Norman".to_string()),
                created_at: None,
                updated_at: None,
            },
        );
    }

    /// The stored phone of a customer, if the customer exists.
    pub async fn phone(&self, id: u64) -> Option<String> {
        self.customers
            .lock()
            .await
            .get(&CustomerId::new(id))
            .and_then(|c| c.phone.clone())
    }

    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = failure;
    }

    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Failure {
        *self.failure.lock().unwrap()
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryDirectory {
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ShopifyError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Failure::Read => {
                return Err(ShopifyError::Api {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                });
            }
            Failure::Panic => panic!("directory exploded"),
            Failure::None | Failure::Write => {}
        }

        self.customers
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopifyError::NotFound(format!("customer {id}")))
    }

    async fn update_customer_phone(
        &self,
        id: CustomerId,
        phone: &str,
    ) -> Result<Customer, ShopifyError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failure() == Failure::Write {
            return Err(ShopifyError::Api {
                status: 422,
                message: "phone is invalid".to_string(),
            });
        }

        let mut customers = self.customers.lock().await;
        let customer = customers
            .get_mut(&id)
            .ok_or_else(|| ShopifyError::NotFound(format!("customer {id}")))?;
        customer.phone = Some(phone.to_string());
        Ok(customer.clone())
    }
}

// =============================================================================
// Served App
// =============================================================================

/// The phone sync app served on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the app over `directory` with [`WEBHOOK_SECRET`] configured.
    pub async fn start(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self::start_with_secret(Some(WEBHOOK_SECRET), directory).await
    }

    /// Serve the app with an explicit (or no) webhook secret.
    pub async fn start_with_secret(
        secret: Option<&str>,
        directory: Arc<dyn CustomerDirectory>,
    ) -> Self {
        let state = AppState::with_directory(
            secret.map(|s| SecretString::from(s.to_string())),
            directory,
        );
        let addr = serve(phone_sync_server::app(state)).await;

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST `body` to the orders/create webhook signed with `secret`.
    pub async fn deliver_signed(&self, body: &str, secret: &str) -> reqwest::Response {
        self.deliver(body, Some(&webhook::sign(body.as_bytes(), secret)))
            .await
    }

    /// POST `body` to the orders/create webhook with an explicit signature.
    pub async fn deliver(&self, body: &str, signature: Option<&str>) -> reqwest::Response {
        let mut request = self
            .client
            .post(self.url("/webhooks/orders/create"))
            .header("content-type", "application/json")
            .header(webhook::TOPIC_HEADER, "orders/create")
            .header(webhook::SHOP_DOMAIN_HEADER, "phone-sync-test.myshopify.com")
            .body(body.to_string());
        if let Some(signature) = signature {
            request = request.header(webhook::HMAC_HEADER, signature);
        }
        request.send().await.unwrap()
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

// =============================================================================
// Fake Admin API
// =============================================================================

/// Shopify Admin REST routes served from an [`InMemoryDirectory`].
pub struct FakeAdminApi {
    pub addr: SocketAddr,
}

#[derive(Clone)]
struct FakeAdminState {
    directory: Arc<InMemoryDirectory>,
    orders: Arc<HashMap<OrderId, Value>>,
}

impl FakeAdminApi {
    /// Serve `directory`, plus `orders` keyed by their `id` field.
    pub async fn start(directory: Arc<InMemoryDirectory>, orders: Vec<Value>) -> Self {
        let orders = orders
            .into_iter()
            .map(|order| (OrderId::new(order["id"].as_u64().unwrap()), order))
            .collect();
        let state = FakeAdminState {
            directory,
            orders: Arc::new(orders),
        };

        let router = Router::new()
            .route("/admin/api/2024-01/shop.json", get(shop))
            .route(
                "/admin/api/2024-01/customers/{file}",
                get(get_customer).put(put_customer),
            )
            .route("/admin/api/2024-01/orders/{file}", get(get_order))
            .with_state(state);

        Self {
            addr: serve(router).await,
        }
    }

    /// Base URL to hand to `AdminClient::with_base_url`.
    #[must_use]
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/admin/api/2024-01/", self.addr)).unwrap()
    }
}

/// Parse `{id}.json` path segments.
fn resource_id(file: &str) -> Option<u64> {
    file.strip_suffix(".json")?.parse().ok()
}

async fn shop() -> Json<Value> {
    Json(json!({
        "shop": {
            "id": 548_380_009,
            "name": "Phone Sync Test",
            "domain": "shop.example.com",
            "myshopify_domain": "phone-sync-test.myshopify.com",
            "email": "owner@example.com"
        }
    }))
}

async fn get_customer(
    State(state): State<FakeAdminState>,
    Path(file): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let id = resource_id(&file).ok_or(StatusCode::NOT_FOUND)?;
    let customer = state
        .directory
        .get_customer(CustomerId::new(id))
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "customer": customer })))
}

async fn put_customer(
    State(state): State<FakeAdminState>,
    Path(file): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = resource_id(&file)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({"errors": "Not Found"}))))?;
    let Some(phone) = body["customer"]["phone"].as_str() else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"errors": {"phone": ["is missing"]}})),
        ));
    };

    let customer = state
        .directory
        .update_customer_phone(CustomerId::new(id), phone)
        .await
        .map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"errors": e.to_string()})),
            )
        })?;
    Ok(Json(json!({ "customer": customer })))
}

async fn get_order(
    State(state): State<FakeAdminState>,
    Path(file): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let id = resource_id(&file).ok_or(StatusCode::NOT_FOUND)?;
    state
        .orders
        .get(&OrderId::new(id))
        .map(|order| Json(json!({ "order": order })))
        .ok_or(StatusCode::NOT_FOUND)
}

// =============================================================================
// Fixtures
// =============================================================================

/// An `orders/create` payload trimmed from a real delivery.
#[must_use]
pub fn order_payload(customer_id: Option<u64>, shipping_phone: Option<&str>) -> Value {
    json!({
        "id": 450_789_469,
        "order_number": 1001,
        "email": "bob.norman@example.com",
        "phone": null,
        "created_at": "2024-01-15T10:30:00-05:00",
        "customer": customer_id.map(|id| json!({
            "id": id,
            "email": "bob.norman@example.com",
            "phone": null
        })),
        "shipping_address": {
            "name": "Bob Norman",
            "address1": "Chestnut Street 92",
            "city": "Louisville",
            "province": "Kentucky",
            "country": "United States",
            "zip": "40202",
            "phone": shipping_phone
        },
        "billing_address": null,
        "line_items": [
            {"id": 466_157_049, "title": "IPod Nano - 8gb", "quantity": 1}
        ]
    })
}

/// Parse an order fixture the way the webhook handler does.
#[must_use]
pub fn order(payload: &Value) -> Order {
    serde_json::from_value(payload.clone()).unwrap()
}
