//! Shopify webhook HMAC verification.
//!
//! Shopify signs every delivery with HMAC-SHA256 over the raw request body,
//! keyed with the app's shared secret, and sends the base64-encoded digest
//! in `X-Shopify-Hmac-SHA256`.
//!
//! # Important Notes
//!
//! - The digest MUST be computed over the body bytes exactly as received.
//!   Parsing and re-serializing the JSON changes whitespace and key order
//!   and invalidates the signature.
//! - The comparison is constant-time to prevent timing attacks.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, error, warn};

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64 HMAC-SHA256 signature Shopify would send for `body`.
#[must_use]
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a webhook body against its `X-Shopify-Hmac-SHA256` header.
///
/// # Arguments
///
/// * `body` - The raw request body bytes, before any parsing
/// * `signature` - The header value (base64 digest), empty if absent
/// * `secret` - The shared webhook secret, empty if not configured
///
/// # Returns
///
/// `true` only if the header matches the digest of `body`. Never panics:
/// an empty header or secret, malformed base64, or a digest of the wrong
/// length all yield `false`.
#[must_use]
pub fn verify(body: &[u8], signature: &str, secret: &str) -> bool {
    if signature.is_empty() || secret.is_empty() {
        error!("Missing HMAC header or secret for webhook validation");
        return false;
    }

    let expected = sign(body, secret);

    // ct_eq on slices of unequal length is false, not an error.
    let is_valid: bool = expected.as_bytes().ct_eq(signature.as_bytes()).into();

    if is_valid {
        debug!("Webhook HMAC validation successful");
    } else {
        warn!("Webhook HMAC validation failed");
    }

    is_valid
}
