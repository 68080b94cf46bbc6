//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `rate_limit` - Per-client, per-resource rate limiting

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimitLayerState};
