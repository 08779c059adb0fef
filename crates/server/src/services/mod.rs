//! Business logic services.
//!
//! # Services
//!
//! - `phone_sync` - Copies an order's shipping phone onto its customer

pub mod phone_sync;

pub use phone_sync::PhoneSyncService;
