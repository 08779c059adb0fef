//! Webhook body signing, for crafting test deliveries.
//!
//! # Usage
//!
//! ```bash
//! SIG=$(phone-sync sign --file order.json)
//! curl -X POST localhost:3000/webhooks/orders/create \
//!     -H "X-Shopify-Hmac-SHA256: $SIG" \
//!     -H "Content-Type: application/json" \
//!     --data-binary @order.json
//! ```
//!
//! Use `--data-binary`; `-d` strips newlines and breaks the signature.
//!
//! # Environment Variables
//!
//! - `SHOPIFY_API_SECRET` - Webhook signing secret

use std::io::Read;
use std::path::Path;

use phone_sync_server::webhook;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur while signing.
#[derive(Debug, Error)]
pub enum SignError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The body could not be read.
    #[error("Failed to read body: {0}")]
    Io(#[from] std::io::Error),
}

/// Print the signature of the body in `file`, or stdin if `None`.
#[allow(clippy::print_stdout)]
pub fn run(file: Option<&Path>) -> Result<(), SignError> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("SHOPIFY_API_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .map(SecretString::from)
        .ok_or(SignError::MissingEnvVar("SHOPIFY_API_SECRET"))?;

    let body = match file {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            body
        }
    };

    println!("{}", signature(&body, &secret));
    Ok(())
}

fn signature(body: &[u8], secret: &SecretString) -> String {
    webhook::sign(body, secret.expose_secret())
}
