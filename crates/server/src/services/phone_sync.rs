//! Phone sync service: copies an order's shipping phone onto its customer.
//!
//! The flow for one order:
//! 1. Bail out (no remote call) if the order has no customer or no usable
//!    shipping phone
//! 2. Read the customer's current record
//! 3. If the stored phone already equals the shipping phone, stop; this is
//!    what makes redeliveries and repeat orders a no-op
//! 4. Otherwise overwrite the customer's phone
//!
//! This is the only place directory errors are translated: every failure
//! becomes a `SyncOutcome` with `success = false`, never an `Err`.

use std::sync::Arc;

use phone_sync_core::{Order, SyncOutcome};
use tracing::{error, info, instrument, warn};

use crate::shopify::CustomerDirectory;

/// Syncs shipping phones onto customer records.
#[derive(Clone)]
pub struct PhoneSyncService {
    directory: Arc<dyn CustomerDirectory>,
}

impl PhoneSyncService {
    /// Create a new phone sync service over `directory`.
    #[must_use]
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self { directory }
    }

    /// Sync the shipping phone of `order` to its customer.
    ///
    /// Always returns an outcome; directory failures (network, 4xx/5xx,
    /// timeout) are reported in it rather than propagated.
    #[instrument(
        skip(self, order),
        fields(order_id = %order.id, order_number = order.order_number)
    )]
    pub async fn sync_phone(&self, order: &Order) -> SyncOutcome {
        let Some(customer_id) = order.customer_id() else {
            let outcome = SyncOutcome::no_customer(order);
            warn!("{}", outcome.message);
            return outcome;
        };

        let Some(phone) = order.shipping_phone() else {
            let outcome = SyncOutcome::no_phone(order, customer_id);
            warn!(customer_id = %customer_id, "{}", outcome.message);
            return outcome;
        };

        let customer = match self.directory.get_customer(customer_id).await {
            Ok(customer) => customer,
            Err(e) => return Self::failure(order, &e),
        };

        if customer.has_phone(phone) {
            let outcome = SyncOutcome::unchanged(order, customer_id, phone);
            info!(customer_id = %customer_id, "{}", outcome.message);
            return outcome;
        }

        info!(
            customer_id = %customer_id,
            phone = %phone,
            previous_phone = ?customer.phone,
            "Syncing shipping phone to customer"
        );

        if let Err(e) = self.directory.update_customer_phone(customer_id, phone).await {
            return Self::failure(order, &e);
        }

        let outcome = SyncOutcome::updated(order, customer_id, phone);
        info!(customer_id = %customer_id, phone = %phone, "{}", outcome.message);
        outcome
    }

    fn failure(order: &Order, e: &dyn std::error::Error) -> SyncOutcome {
        let outcome = SyncOutcome::failed(order, e.to_string());
        error!(
            error = %e,
            order_number = order.order_number,
            customer_id = %outcome.customer_id,
            "{}",
            outcome.message
        );
        outcome
    }
}
