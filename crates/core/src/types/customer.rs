//! Customer record owned by Shopify.

use serde::{Deserialize, Serialize};

use super::id::CustomerId;

/// A customer as returned by the Admin REST API.
///
/// The sync pipeline never creates customers; it reads one and may update
/// its `phone` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Shopify allows customers without an email (e.g. SMS-only signups).
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Customer {
    /// Whether the stored phone is exactly `phone`.
    ///
    /// No normalization is applied: `+1 555 123 4567` and `+15551234567`
    /// are different values.
    #[must_use]
    pub fn has_phone(&self, phone: &str) -> bool {
        self.phone.as_deref() == Some(phone)
    }
}
