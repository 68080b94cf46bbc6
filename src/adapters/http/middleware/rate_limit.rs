//! Rate limiting middleware for axum.
//!
//! This module provides middleware that enforces rate limits using the `RateLimiter` port.
//!
//! # Architecture
//!
//! Each layer is bound to one `RateLimitResource`. The router applies the
//! `General` layer to every route, and the email and AI routes add their own
//! stricter layer on top, so a request to `/api/send-report` draws from both
//! the general and the email budget.
//!
//! Rate limit status is returned in standard HTTP headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::post, middleware};
//!
//! let email_limit = RateLimitLayerState::new(limiter.clone(), RateLimitResource::Email);
//!
//! let app = Router::new()
//!     .route("/api/send-report", post(handler))
//!     .route_layer(middleware::from_fn_with_state(email_limit, rate_limit_middleware));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{RateLimitKey, RateLimitResource, RateLimitResult, RateLimiter};

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// State for one rate limit layer: the shared limiter and the budget it draws from.
#[derive(Clone)]
pub struct RateLimitLayerState {
    limiter: Arc<dyn RateLimiter>,
    resource: RateLimitResource,
}

impl RateLimitLayerState {
    pub fn new(limiter: Arc<dyn RateLimiter>, resource: RateLimitResource) -> Self {
        Self { limiter, resource }
    }
}

/// Rate limiting middleware for a single resource.
///
/// This middleware:
/// 1. Extracts client IP from forwarded headers or `ConnectInfo`
/// 2. Checks the client's budget for the layer's resource
/// 3. Returns 429 Too Many Requests if the budget is exhausted
/// 4. Adds rate limit headers to allowed responses
///
/// Requests with no identifiable client, and requests arriving while the
/// limiter backend is failing, are let through.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitLayerState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(client_ip) = extract_client_ip(&request, connect_info.as_ref()) else {
        tracing::debug!(resource = %state.resource, "No client address, skipping rate limit");
        return next.run(request).await;
    };

    let key = RateLimitKey::new(client_ip, state.resource);
    let status = match state.limiter.check(key).await {
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Ok(RateLimitResult::Denied(denied)) => {
            tracing::info!(
                resource = %denied.resource,
                retry_after = denied.retry_after_secs,
                "Rate limit exceeded"
            );
            return rate_limit_response(denied.limit, 0, denied.retry_after_secs, &denied.message);
        }
        Err(e) => {
            // Fail open for availability
            tracing::warn!(resource = %state.resource, error = %e, "Rate limiter unavailable");
            None
        }
    };

    let mut response = next.run(request).await;

    if let Some(status) = status {
        add_rate_limit_headers(
            &mut response,
            status.limit,
            status.remaining,
            status.reset_at.timestamp(),
        );
    }

    response
}

/// Extract client IP from request, checking forwarded headers first.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(first_ip) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(first_ip.to_string());
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(real_ip.to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// Create a 429 Too Many Requests response.
fn rate_limit_response(limit: u32, remaining: u32, retry_after_secs: u32, message: &str) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "errorCode": "RATE_LIMIT_EXCEEDED",
            "message": message,
        })),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(remaining));
    headers.insert("Retry-After", HeaderValue::from(retry_after_secs));

    response
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(response: &mut Response, limit: u32, remaining: u32, reset_at: i64) {
    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(remaining));
    headers.insert(headers::X_RATELIMIT_RESET.clone(), HeaderValue::from(reset_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::InMemoryRateLimiter;
    use crate::config::{RateLimitConfig, WindowLimit};
    use crate::ports::{RateLimitError, RateLimitStatus};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(limiter: Arc<dyn RateLimiter>, resource: RateLimitResource) -> Router {
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                RateLimitLayerState::new(limiter, resource),
                rate_limit_middleware,
            ))
    }

    fn request_from(ip: &str) -> Request<Body> {
        Request::builder()
            .uri("/test")
            .header("X-Forwarded-For", ip)
            .body(Body::empty())
            .unwrap()
    }

    struct BrokenLimiter;

    #[async_trait]
    impl RateLimiter for BrokenLimiter {
        async fn check(&self, _key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
            Err(RateLimitError::Unavailable("down".to_string()))
        }
        async fn status(&self, _key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
            Err(RateLimitError::Unavailable("down".to_string()))
        }
        async fn reset(&self, _key: RateLimitKey) -> Result<(), RateLimitError> {
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // IP Extraction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn extract_ip_from_x_forwarded_for() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Forwarded-For", "1.2.3.4, 5.6.7.8")
            .body(())
            .unwrap();

        assert_eq!(extract_client_ip(&request, None), Some("1.2.3.4".to_string()));
    }

    #[test]
    fn extract_ip_from_x_real_ip() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Real-IP", "9.8.7.6")
            .body(())
            .unwrap();

        assert_eq!(extract_client_ip(&request, None), Some("9.8.7.6".to_string()));
    }

    #[test]
    fn extract_ip_prefers_x_forwarded_for() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Forwarded-For", "1.2.3.4")
            .header("X-Real-IP", "5.6.7.8")
            .body(())
            .unwrap();

        assert_eq!(extract_client_ip(&request, None), Some("1.2.3.4".to_string()));
    }

    #[test]
    fn extract_ip_falls_back_to_socket_address() {
        let request = Request::builder().uri("/test").body(()).unwrap();
        let info = ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000)));

        assert_eq!(extract_client_ip(&request, Some(&info)), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn extract_ip_returns_none_without_headers() {
        let request = Request::builder().uri("/test").body(()).unwrap();
        assert_eq!(extract_client_ip(&request, None), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn allowed_request_carries_limit_headers() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::with_defaults());
        let response = app(limiter, RateLimitResource::Email)
            .oneshot(request_from("1.1.1.1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "5");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "4");
        assert!(response.headers().contains_key("x-ratelimit-reset"));
    }

    #[tokio::test]
    async fn exhausted_budget_returns_429_with_retry_after() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            ai: WindowLimit::new(1, 60),
            ..Default::default()
        }));
        let app = app(limiter, RateLimitResource::Ai);

        let first = app.clone().oneshot(request_from("2.2.2.2")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(request_from("2.2.2.2")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("retry-after"));
        assert_eq!(second.headers()["x-ratelimit-remaining"], "0");
    }

    #[tokio::test]
    async fn broken_limiter_fails_open() {
        let response = app(Arc::new(BrokenLimiter), RateLimitResource::General)
            .oneshot(request_from("3.3.3.3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("x-ratelimit-limit"));
    }

    #[tokio::test]
    async fn unidentified_client_is_not_limited() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            general: WindowLimit::new(1, 60),
            ..Default::default()
        }));
        let app = app(limiter, RateLimitResource::General);

        for _ in 0..3 {
            let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Response Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn rate_limit_response_has_retry_after_header() {
        let response = rate_limit_response(100, 0, 30, "slow down");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "30");
    }

    #[test]
    fn layer_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateLimitLayerState>();
    }
}
