//! Order payload delivered by the `orders/create` webhook.
//!
//! Only the fields the sync pipeline reads are modelled. Unknown fields in
//! the webhook body are ignored, so Shopify can add fields without breaking
//! deserialization.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CustomerId, OrderId};

/// A Shopify order as delivered in a webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Human-readable order number (e.g. `1001`).
    pub order_number: u64,
    /// Contact email on the order.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone on the order (not used as the sync source).
    #[serde(default)]
    pub phone: Option<String>,
    /// Customer the order belongs to, absent for some draft/POS orders.
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    /// Shipping address, absent for orders that do not require shipping.
    #[serde(default)]
    pub shipping_address: Option<Address>,
    /// Billing address.
    #[serde(default)]
    pub billing_address: Option<Address>,
    /// Creation timestamp as sent by Shopify.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The customer reference embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCustomer {
    /// Customer ID, [`CustomerId::UNSET`] when the payload omits it or
    /// sends `null`.
    #[serde(default, deserialize_with = "nullable_customer_id")]
    pub id: CustomerId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn nullable_customer_id<'de, D>(deserializer: D) -> Result<CustomerId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map_or(CustomerId::UNSET, CustomerId::new))
}

/// A postal address attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Address {
    /// The phone number, if present and not blank.
    ///
    /// Returns the value exactly as received; trimming only decides whether
    /// it counts as present.
    #[must_use]
    pub fn usable_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|phone| !phone.trim().is_empty())
    }
}

impl Order {
    /// The referenced customer's ID, if the order has a non-empty one.
    #[must_use]
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer
            .as_ref()
            .map(|customer| customer.id)
            .filter(|id| !id.is_unset())
    }

    /// The shipping address phone, if present and not blank.
    #[must_use]
    pub fn shipping_phone(&self) -> Option<&str> {
        self.shipping_address.as_ref().and_then(Address::usable_phone)
    }

    /// Whether the shipping address carries a phone field at all.
    #[must_use]
    pub fn has_shipping_phone(&self) -> bool {
        self.shipping_address
            .as_ref()
            .is_some_and(|address| address.phone.is_some())
    }
}
