//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (record `x-request-id` on the span and Sentry scope)
//! 4. Catch panic (webhook routes only, acknowledges with 200)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
