//! Core types for phone sync.
//!
//! This module provides type-safe wrappers for the Shopify entities the sync
//! pipeline reads and writes.

pub mod customer;
pub mod id;
pub mod metadata;
pub mod order;
pub mod outcome;

pub use customer::Customer;
pub use id::*;
pub use metadata::WebhookMetadata;
pub use order::{Address, Order, OrderCustomer};
pub use outcome::SyncOutcome;
