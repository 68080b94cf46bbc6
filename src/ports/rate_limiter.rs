//! Rate limiting port for protecting the public endpoints.
//!
//! Limits are per client and per resource: general traffic, the email
//! endpoint, and the AI endpoint each have their own window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
/// The rate limiter uses a fixed-window counter algorithm for simplicity.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if request is allowed, consuming a slot if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Get current rate limit status without consuming a slot.
    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError>;

    /// Reset rate limit for a key, restoring full quota.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

/// Which budget a request draws from.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitResource {
    /// Every API request.
    General,
    /// Report delivery by email.
    Email,
    /// AI narrative generation.
    Ai,
}

impl RateLimitResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitResource::General => "general",
            RateLimitResource::Email => "email",
            RateLimitResource::Ai => "ai",
        }
    }
}

impl fmt::Display for RateLimitResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key identifying one client's budget for one resource.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Client identifier, normally the IP address.
    pub client: String,
    pub resource: RateLimitResource,
}

impl RateLimitKey {
    pub fn new(client: impl Into<String>, resource: RateLimitResource) -> Self {
        Self {
            client: client.into(),
            resource,
        }
    }

    pub fn general(client: &str) -> Self {
        Self::new(client, RateLimitResource::General)
    }

    pub fn email(client: &str) -> Self {
        Self::new(client, RateLimitResource::Email)
    }

    pub fn ai(client: &str) -> Self {
        Self::new(client, RateLimitResource::Ai)
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ratelimit:{}:{}", self.resource, self.client)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Current rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: DateTime<Utc>,
    /// Window duration in seconds.
    pub window_secs: u32,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Seconds until the client should retry.
    pub retry_after_secs: u32,
    /// The resource whose budget is exhausted.
    pub resource: RateLimitResource,
    /// Human-readable message explaining the denial.
    pub message: String,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),

    /// Invalid rate limit key provided.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_resource() {
        assert_eq!(RateLimitKey::general("1.2.3.4").resource, RateLimitResource::General);
        assert_eq!(RateLimitKey::email("1.2.3.4").resource, RateLimitResource::Email);
        assert_eq!(RateLimitKey::ai("1.2.3.4").resource, RateLimitResource::Ai);
    }

    #[test]
    fn key_display_includes_resource_and_client() {
        let key = RateLimitKey::email("10.0.0.1");
        assert_eq!(key.to_string(), "ratelimit:email:10.0.0.1");
    }

    #[test]
    fn keys_for_different_resources_differ() {
        assert_ne!(RateLimitKey::general("a"), RateLimitKey::ai("a"));
    }

    #[test]
    fn rate_limit_result_predicates() {
        let allowed = RateLimitResult::Allowed(RateLimitStatus {
            limit: 100,
            remaining: 50,
            reset_at: Utc::now(),
            window_secs: 60,
        });
        assert!(allowed.is_allowed());
        assert!(!allowed.is_denied());

        let denied = RateLimitResult::Denied(RateLimitDenied {
            limit: 5,
            retry_after_secs: 30,
            resource: RateLimitResource::Email,
            message: "Rate limit exceeded".to_string(),
        });
        assert!(denied.is_denied());
        assert!(!denied.is_allowed());
    }
}
