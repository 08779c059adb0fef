//! Phone Sync Core - Shared types library.
//!
//! This crate provides the domain types used across all phone sync components:
//! - `server` - Webhook receiver that syncs shipping phones onto customers
//! - `cli` - Command-line tools for connection checks and test deliveries
//!
//! # Architecture
//!
//! The core crate contains only types and pure decision logic - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, webhook order payloads, customers and sync outcomes
//! - [`policy`] - Decides whether an order warrants a phone sync

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod policy;
pub mod types;

pub use policy::should_sync;
pub use types::*;
