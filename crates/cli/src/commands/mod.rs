//! CLI command implementations.

pub mod connection;
pub mod sign;
pub mod sync;
