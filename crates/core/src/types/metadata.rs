//! Webhook delivery metadata.

use serde::{Deserialize, Serialize};

/// Metadata Shopify attaches to every webhook delivery via headers.
///
/// Used for logging only, never for authorization: none of these values are
/// covered by the HMAC signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMetadata {
    /// `X-Shopify-Topic`, e.g. `orders/create`.
    pub topic: Option<String>,
    /// `X-Shopify-Shop-Domain`.
    pub shop: Option<String>,
    /// `X-Shopify-Webhook-Id`, stable across redeliveries.
    pub webhook_id: Option<String>,
    /// `X-Shopify-Api-Version`.
    pub api_version: Option<String>,
}
