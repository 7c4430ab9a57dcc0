//! # HTTP Middleware
//!
//! - `tracing_layer`: per-request spans and response logging.

pub mod tracing_layer;
