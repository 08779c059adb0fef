//! Manual phone sync for a single order.
//!
//! Runs the same sync the webhook runs, for orders whose delivery was
//! missed or rejected.
//!
//! # Usage
//!
//! ```bash
//! phone-sync sync-order 450789469
//! ```

use std::sync::Arc;

use phone_sync_core::{OrderId, should_sync};
use phone_sync_server::config::{ConfigError, ShopifyConfig};
use phone_sync_server::services::PhoneSyncService;
use phone_sync_server::shopify::{AdminClient, ShopifyError};
use thiserror::Error;

/// Errors that can occur during a manual sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The order could not be fetched.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// The sync ran and reported failure.
    #[error("{0}")]
    Failed(String),
}

/// Fetch order `id` and sync its shipping phone.
#[allow(clippy::print_stdout)]
pub async fn order(id: u64) -> Result<(), SyncError> {
    let config = ShopifyConfig::from_env()?;
    let client = Arc::new(AdminClient::new(&config)?);

    let order = client.get_order(OrderId::new(id)).await?;
    tracing::info!("Fetched order #{}", order.order_number);

    if !should_sync(&order) {
        println!("Order #{} does not need a phone sync", order.order_number);
        return Ok(());
    }

    let outcome = PhoneSyncService::new(client).sync_phone(&order).await;
    println!("{}", outcome.message);

    if outcome.success {
        Ok(())
    } else {
        Err(SyncError::Failed(outcome.error.unwrap_or(outcome.message)))
    }
}
