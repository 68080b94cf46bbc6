//! HTTP adapters - REST API implementations.
//!
//! - `audit` - The audit endpoints and their shared state
//! - `middleware` - Per-client rate limiting
//!
//! [`app`] assembles the full service: the audit router plus the CORS,
//! tracing, and request-timeout layers.

pub mod audit;
pub mod middleware;

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::ports::RateLimiter;

// Re-export key types for convenience
pub use audit::{audit_router, AuditApiError, AuditAppState};

/// Build the complete application router.
///
/// Layer order: cors (outer) -> trace -> timeout -> rate limits -> handler.
pub fn app(state: AuditAppState, limiter: Arc<dyn RateLimiter>, server: &ServerConfig) -> Router {
    audit_router(limiter)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
        .with_state(state)
}

/// CORS for browser clients: POST and preflight, JSON bodies.
///
/// Any origin is allowed unless `server.cors_origins` lists specific ones.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter(|o| !o.is_empty() && o.as_str() != "*")
        .filter_map(|o| o.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
