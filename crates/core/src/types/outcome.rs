//! Result of one phone sync attempt.

use serde::{Deserialize, Serialize};

use super::id::{CustomerId, OrderId};
use super::order::Order;

/// Structured result of syncing an order's shipping phone to its customer.
///
/// Built fresh for every webhook delivery, serialized into the response body
/// and a log line, then dropped. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    /// [`CustomerId::UNSET`] (serialized as `0`) when the order has no customer.
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    /// The shipping phone considered, empty when there was none.
    pub phone_number: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    /// The order references no customer, so there is nothing to update.
    #[must_use]
    pub fn no_customer(order: &Order) -> Self {
        Self {
            success: false,
            customer_id: CustomerId::UNSET,
            order_id: order.id,
            phone_number: String::new(),
            message: format!("Order {} has no associated customer", order.order_number),
            error: Some("No customer associated with order".to_string()),
        }
    }

    /// The shipping address carries no usable phone.
    #[must_use]
    pub fn no_phone(order: &Order, customer_id: CustomerId) -> Self {
        Self {
            success: false,
            customer_id,
            order_id: order.id,
            phone_number: String::new(),
            message: format!(
                "Order {} has no phone in shipping address",
                order.order_number
            ),
            error: Some("No phone number in shipping address".to_string()),
        }
    }

    /// The customer already stores this phone; no write was issued.
    #[must_use]
    pub fn unchanged(order: &Order, customer_id: CustomerId, phone: &str) -> Self {
        Self {
            success: true,
            customer_id,
            order_id: order.id,
            phone_number: phone.to_string(),
            message: format!(
                "Customer {customer_id} already has phone {phone} - No update needed"
            ),
            error: None,
        }
    }

    /// The customer's phone was overwritten with the shipping phone.
    #[must_use]
    pub fn updated(order: &Order, customer_id: CustomerId, phone: &str) -> Self {
        Self {
            success: true,
            customer_id,
            order_id: order.id,
            phone_number: phone.to_string(),
            message: format!("Successfully synced phone {phone} to customer {customer_id}"),
            error: None,
        }
    }

    /// A remote read or write failed with `error`.
    #[must_use]
    pub fn failed(order: &Order, error: impl Into<String>) -> Self {
        Self {
            success: false,
            customer_id: order.customer_id().unwrap_or(CustomerId::UNSET),
            order_id: order.id,
            phone_number: order
                .shipping_address
                .as_ref()
                .and_then(|address| address.phone.clone())
                .unwrap_or_default(),
            message: format!("Failed to sync phone for order {}", order.order_number),
            error: Some(error.into()),
        }
    }
}
