//! Shopify webhook authentication and delivery metadata.

pub mod signature;

use axum::http::HeaderMap;
use phone_sync_core::WebhookMetadata;

pub use signature::{sign, verify};

/// Base64 HMAC-SHA256 of the raw body.
pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";
pub const TOPIC_HEADER: &str = "x-shopify-topic";
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";
pub const WEBHOOK_ID_HEADER: &str = "x-shopify-webhook-id";
pub const API_VERSION_HEADER: &str = "x-shopify-api-version";

/// Read a header as a string, treating non-UTF-8 values as absent.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Extract delivery metadata from Shopify's webhook headers.
#[must_use]
pub fn extract_metadata(headers: &HeaderMap) -> WebhookMetadata {
    let owned = |name| header_str(headers, name).map(String::from);

    WebhookMetadata {
        topic: owned(TOPIC_HEADER),
        shop: owned(SHOP_DOMAIN_HEADER),
        webhook_id: owned(WEBHOOK_ID_HEADER),
        api_version: owned(API_VERSION_HEADER),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert(TOPIC_HEADER, HeaderValue::from_static("orders/create"));
        headers.insert(
            SHOP_DOMAIN_HEADER,
            HeaderValue::from_static("phone-sync-test.myshopify.com"),
        );
        headers.insert(
            WEBHOOK_ID_HEADER,
            HeaderValue::from_static("b54557e4-bdd9-4b37-8a5f-bf7d70bcd043"),
        );

        let metadata = extract_metadata(&headers);

        assert_eq!(metadata.topic.as_deref(), Some("orders/create"));
        assert_eq!(
            metadata.shop.as_deref(),
            Some("phone-sync-test.myshopify.com")
        );
        assert_eq!(
            metadata.webhook_id.as_deref(),
            Some("b54557e4-bdd9-4b37-8a5f-bf7d70bcd043")
        );
        assert_eq!(metadata.api_version, None);
    }

    #[test]
    fn test_non_utf8_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HMAC_HEADER,
            HeaderValue::from_bytes(b"\xff\xfe").unwrap(),
        );

        assert_eq!(header_str(&headers, HMAC_HEADER), None);
    }
}
