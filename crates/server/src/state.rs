//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::config::SyncConfig;
use crate::services::PhoneSyncService;
use crate::shopify::{AdminClient, CustomerDirectory, ShopifyError};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    webhook_secret: Option<SecretString>,
    phone_sync: PhoneSyncService,
}

impl AppState {
    /// Build state backed by the Shopify Admin API.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Config` if the Admin API client cannot be built.
    pub fn new(config: &SyncConfig) -> Result<Self, ShopifyError> {
        let client = AdminClient::new(config.shopify())?;
        Ok(Self::with_directory(
            config.shopify().webhook_secret.clone(),
            Arc::new(client),
        ))
    }

    /// Build state over any customer directory.
    #[must_use]
    pub fn with_directory(
        webhook_secret: Option<SecretString>,
        directory: Arc<dyn CustomerDirectory>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                webhook_secret,
                phone_sync: PhoneSyncService::new(directory),
            }),
        }
    }

    /// The webhook signing secret, empty if not configured.
    #[must_use]
    pub fn webhook_secret(&self) -> &str {
        self.inner
            .webhook_secret
            .as_ref()
            .map_or("", |secret| secret.expose_secret())
    }

    /// The phone sync service.
    #[must_use]
    pub fn phone_sync(&self) -> &PhoneSyncService {
        &self.inner.phone_sync
    }
}
