//! Shopify Admin API access (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **CRITICAL: This module holds the Admin API access token.**
//!
//! The token grants read/write access to every customer record in the
//! store. It is injected once from [`crate::config::ShopifyConfig`] and
//! never logged.
//!
//! # Architecture
//!
//! - [`CustomerDirectory`] is the seam the sync pipeline depends on: read a
//!   customer, overwrite its phone. Errors propagate untranslated.
//! - [`AdminClient`] implements it against the Admin REST API with a
//!   client-wide request timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use phone_sync_server::shopify::{AdminClient, CustomerDirectory};
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! let customer = client.get_customer(CustomerId::new(207119551)).await?;
//! client.update_customer_phone(customer.id, "+15551234567").await?;
//! ```

mod client;
pub mod types;

pub use client::AdminClient;
pub use types::Shop;

use async_trait::async_trait;
use phone_sync_core::{Customer, CustomerId};
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client could not be built from configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Read and update customer records on the remote store.
///
/// Implementations propagate every failure; deciding what counts as a
/// reportable sync failure is the caller's job.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Fetch a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if the customer does not exist, or a
    /// transport/API error.
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ShopifyError>;

    /// Overwrite a customer's phone number, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns a transport/API error; on error the update was not applied.
    async fn update_customer_phone(
        &self,
        id: CustomerId,
        phone: &str,
    ) -> Result<Customer, ShopifyError>;
}
