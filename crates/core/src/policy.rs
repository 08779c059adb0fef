//! Sync policy: decides whether an order warrants a phone sync.
//!
//! Evaluated before any network call so orders without an actionable
//! shipping phone never reach the Admin API.

use crate::types::Order;

/// Whether `order` should have its shipping phone synced to its customer.
///
/// True iff the order references a customer with a non-empty ID and its
/// shipping address carries a phone that is non-empty after trimming.
#[must_use]
pub fn should_sync(order: &Order) -> bool {
    order.customer_id().is_some() && order.shipping_phone().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, CustomerId, OrderCustomer, OrderId};

    fn order(customer_id: Option<u64>, phone: Option<Option<&str>>) -> Order {
        Order {
            id: OrderId::new(1),
            order_number: 1001,
            email: None,
            phone: None,
            customer: customer_id.map(|id| OrderCustomer {
                id: CustomerId::new(id),
                email: None,
                phone: None,
            }),
            shipping_address: phone.map(|phone| Address {
                phone: phone.map(String::from),
                ..Address::default()
            }),
            billing_address: None,
            created_at: None,
        }
    }

    #[test]
    fn test_syncs_customer_with_shipping_phone() {
        assert!(should_sync(&order(Some(7), Some(Some("+15551234567")))));
    }

    #[test]
    fn test_skips_without_customer() {
        assert!(!should_sync(&order(None, Some(Some("+15551234567")))));
    }

    #[test]
    fn test_skips_customer_without_id() {
        assert!(!should_sync(&order(Some(0), Some(Some("+15551234567")))));
    }

    #[test]
    fn test_skips_without_shipping_address() {
        assert!(!should_sync(&order(Some(7), None)));
    }

    #[test]
    fn test_skips_without_phone() {
        assert!(!should_sync(&order(Some(7), Some(None))));
    }

    #[test]
    fn test_skips_empty_and_blank_phone() {
        assert!(!should_sync(&order(Some(7), Some(Some("")))));
        assert!(!should_sync(&order(Some(7), Some(Some("   ")))));
        assert!(!should_sync(&order(Some(7), Some(Some("\t\n")))));
    }

    #[test]
    fn test_padded_phone_still_syncs() {
        assert!(should_sync(&order(Some(7), Some(Some("  +44 20 7946 0958 ")))));
    }
}
