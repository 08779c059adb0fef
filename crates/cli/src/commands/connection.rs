//! Admin API connection check.
//!
//! # Usage
//!
//! ```bash
//! phone-sync check-connection
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE_URL` - Store domain (required)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token (required)
//! - `SHOPIFY_API_SECRET` - Webhook signing secret (reported, not used)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-01)

use phone_sync_server::config::{ConfigError, ShopifyConfig};
use phone_sync_server::shopify::{AdminClient, ShopifyError};
use thiserror::Error;

/// Errors that can occur while checking the connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

/// Report the loaded configuration and fetch the shop record.
#[allow(clippy::print_stdout)]
pub async fn check() -> Result<(), ConnectionError> {
    let config = ShopifyConfig::from_env()?;

    println!("Store:        {}", config.store);
    println!("API version:  {}", config.api_version);
    println!("Access token: {}", presence(true));
    println!("API secret:   {}", presence(config.webhook_secret.is_some()));

    let client = AdminClient::new(&config)?;

    tracing::info!("Calling GET /shop.json...");
    let shop = client.shop().await?;

    println!();
    println!("Connected to {}", shop.name);
    println!("Shop ID:      {}", shop.id);
    if let Some(domain) = &shop.myshopify_domain {
        println!("Shopify:      {domain}");
    }
    if let Some(domain) = &shop.domain {
        println!("Domain:       {domain}");
    }
    if let Some(email) = &shop.email {
        println!("Email:        {email}");
    }

    Ok(())
}

const fn presence(set: bool) -> &'static str {
    if set { "set (redacted)" } else { "NOT SET" }
}
