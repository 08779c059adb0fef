//! Admin REST API payload shapes.
//!
//! Shopify wraps every resource in a single-key envelope
//! (`{"customer": {...}}`), so each resource gets a thin wrapper here.

use phone_sync_core::{Customer, CustomerId, Order};
use serde::{Deserialize, Serialize};

/// Store details returned by `GET /shop.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub myshopify_domain: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CustomerEnvelope {
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub(super) struct OrderEnvelope {
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub(super) struct ShopEnvelope {
    pub shop: Shop,
}

/// Body of `PUT /customers/{id}.json` touching only the phone.
#[derive(Debug, Serialize)]
pub(super) struct CustomerPhoneUpdate<'a> {
    pub customer: CustomerPhoneFields<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct CustomerPhoneFields<'a> {
    pub id: CustomerId,
    pub phone: &'a str,
}
