//! Shopify Admin REST API client.
//!
//! Only the handful of endpoints the phone sync needs are wrapped: customer
//! read/update, order read, and the shop endpoint used as a connection check.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use phone_sync_core::{Customer, CustomerId, Order, OrderId};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ShopifyConfig;

use super::types::{
    CustomerEnvelope, CustomerPhoneFields, CustomerPhoneUpdate, OrderEnvelope, Shop, ShopEnvelope,
};
use super::{CustomerDirectory, ShopifyError};

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Fallback when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Shopify Admin REST API client.
///
/// Cheap to clone; all clones share one connection pool. Credentials and the
/// timeout are fixed at construction.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    /// e.g. `https://shop.myshopify.com/admin/api/2024-01/`
    base_url: Url,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Create a client for the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Config` if the store domain does not form a
    /// valid URL or the token is not a valid header value.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let base_url = config
            .admin_api_base()
            .map_err(|e| ShopifyError::Config(e.to_string()))?;

        Self::with_base_url(base_url, &config.access_token, config.timeout)
    }

    /// Create a client against an explicit API base URL.
    ///
    /// `base_url` must end with a slash so relative resource paths join
    /// beneath it.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Config` if the token is not a valid header
    /// value, or `ShopifyError::Http` if the HTTP client fails to build.
    pub fn with_base_url(
        base_url: Url,
        access_token: &SecretString,
        timeout: Duration,
    ) -> Result<Self, ShopifyError> {
        let mut headers = HeaderMap::new();

        let mut token = HeaderValue::from_str(access_token.expose_secret())
            .map_err(|e| ShopifyError::Config(format!("Invalid access token format: {e}")))?;
        token.set_sensitive(true);
        headers.insert(ACCESS_TOKEN_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner { client, base_url }),
        })
    }

    /// The API base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` on 404, or any transport/API error.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ShopifyError> {
        debug!("Fetching customer");

        let envelope: CustomerEnvelope = self
            .get_json(&format!("customers/{id}.json"), &format!("customer {id}"))
            .await?;

        Ok(envelope.customer)
    }

    /// Overwrite a customer's phone number.
    ///
    /// Only the `phone` field is sent; every other customer field is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns any transport/API error. Shopify rejects malformed numbers
    /// with a 422, surfaced as `ShopifyError::Api`.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn update_customer_phone(
        &self,
        id: CustomerId,
        phone: &str,
    ) -> Result<Customer, ShopifyError> {
        info!(phone = %phone, "Updating customer phone");

        let body = CustomerPhoneUpdate {
            customer: CustomerPhoneFields { id, phone },
        };
        let envelope: CustomerEnvelope = self
            .put_json(
                &format!("customers/{id}.json"),
                &format!("customer {id}"),
                &body,
            )
            .await?;

        info!("Customer phone updated");
        Ok(envelope.customer)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` on 404, or any transport/API error.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ShopifyError> {
        debug!("Fetching order");

        let envelope: OrderEnvelope = self
            .get_json(&format!("orders/{id}.json"), &format!("order {id}"))
            .await?;

        Ok(envelope.order)
    }

    /// Fetch the shop record. Used to check credentials and connectivity.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Unauthorized` for a bad token, or any
    /// transport/API error.
    #[instrument(skip(self))]
    pub async fn shop(&self) -> Result<Shop, ShopifyError> {
        let envelope: ShopEnvelope = self.get_json("shop.json", "shop").await?;
        Ok(envelope.shop)
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    fn url(&self, path: &str) -> Result<Url, ShopifyError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ShopifyError::Config(format!("Invalid resource path {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T, ShopifyError> {
        let response = self.inner.client.get(self.url(path)?).send().await?;
        read_json(response, resource).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
        body: &B,
    ) -> Result<T, ShopifyError> {
        let response = self
            .inner
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await?;
        read_json(response, resource).await
    }
}

/// Map a response to a typed body or a `ShopifyError`.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<T, ShopifyError> {
    let status = response.status();

    match status {
        StatusCode::NOT_FOUND => return Err(ShopifyError::NotFound(resource.to_string())),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!(resource, retry_after, "Shopify rate limit hit");
            return Err(ShopifyError::RateLimited(retry_after));
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let message = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Unauthorized(message));
        }
        _ => {}
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        warn!(resource, status = status.as_u16(), "Shopify API error");
        return Err(ShopifyError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ShopifyError::Parse(e.to_string()))
}

/// Shopify sends `Retry-After` as fractional seconds (`"2.0"`).
fn parse_retry_after(value: &str) -> Option<u64> {
    value.split('.').next()?.trim().parse().ok()
}

#[async_trait]
impl CustomerDirectory for AdminClient {
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ShopifyError> {
        Self::get_customer(self, id).await
    }

    async fn update_customer_phone(
        &self,
        id: CustomerId,
        phone: &str,
    ) -> Result<Customer, ShopifyError> {
        Self::update_customer_phone(self, id, phone).await
    }
}
