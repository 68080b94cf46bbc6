//! In-memory rate limiter.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! State is per process; a multi-instance deployment gets one budget per
//! instance.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::{RateLimitConfig, WindowLimit};
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

/// Fixed-window rate limiter. Each key tracks a request count that resets
/// when its window expires.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<RateLimitKey, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: i64,
}

impl WindowState {
    fn expired(&self, now: i64, window_secs: u32) -> bool {
        now >= self.window_start + i64::from(window_secs)
    }
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn limit_for(&self, key: &RateLimitKey) -> WindowLimit {
        self.config.limit_for(key.resource)
    }

    fn now_secs() -> i64 {
        Utc::now().timestamp()
    }

    fn reset_at(window_start: i64, window_secs: u32) -> Result<DateTime<Utc>, RateLimitError> {
        Utc.timestamp_opt(window_start + i64::from(window_secs), 0)
            .single()
            .ok_or_else(|| RateLimitError::Unavailable("window end out of range".to_string()))
    }

    /// Drops windows that have expired. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Self::now_secs();
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|key, state| !state.expired(now, self.config.limit_for(key.resource).window_secs));
        before - windows.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        if key.client.is_empty() {
            return Err(RateLimitError::InvalidKey("empty client identifier".to_string()));
        }
        let WindowLimit {
            max_requests: limit,
            window_secs,
        } = self.limit_for(&key);
        let now = Self::now_secs();
        let resource = key.resource;

        let mut windows = self.windows.write().await;

        let state = windows.entry(key).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
        });

        if state.expired(now, window_secs) {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after = (state.window_start + i64::from(window_secs))
                .saturating_sub(now)
                .max(1) as u32;

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after,
                resource,
                message: format!(
                    "Too many {} requests. Please try again in {} seconds.",
                    resource, retry_after
                ),
            }));
        }

        state.count += 1;

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at: Self::reset_at(state.window_start, window_secs)?,
            window_secs,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let WindowLimit {
            max_requests: limit,
            window_secs,
        } = self.limit_for(&key);
        let now = Self::now_secs();

        let windows = self.windows.read().await;

        let (count, window_start) = windows
            .get(&key)
            .filter(|state| !state.expired(now, window_secs))
            .map(|state| (state.count, state.window_start))
            .unwrap_or((0, now));

        Ok(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count),
            reset_at: Self::reset_at(window_start, window_secs)?,
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RateLimitResource;

    fn limiter_with_email_limit(max_requests: u32) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            email: WindowLimit::new(max_requests, 60),
            ..Default::default()
        })
    }

    // ─── Basic Functionality Tests ───────────────────────────────────

    #[tokio::test]
    async fn allows_requests_within_limit() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::general("192.168.1.1");

        for i in 0..10 {
            let result = limiter.check(key.clone()).await.unwrap();
            assert!(result.is_allowed(), "Request {} should be allowed", i + 1);
        }
    }

    #[tokio::test]
    async fn denies_requests_at_limit() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::email("192.168.1.1");

        // Email limit is 5 per minute
        for _ in 0..5 {
            assert!(limiter.check(key.clone()).await.unwrap().is_allowed());
        }

        let result = limiter.check(key.clone()).await.unwrap();
        let RateLimitResult::Denied(denied) = result else {
            panic!("sixth email request should be denied");
        };
        assert_eq!(denied.limit, 5);
        assert!(denied.retry_after_secs > 0 && denied.retry_after_secs <= 60);
        assert_eq!(denied.resource, RateLimitResource::Email);
    }

    #[tokio::test]
    async fn status_returns_remaining_count() {
        let limiter = limiter_with_email_limit(10);
        let key = RateLimitKey::email("10.0.0.1");

        let status = limiter.status(key.clone()).await.unwrap();
        assert_eq!(status.limit, 10);
        assert_eq!(status.remaining, 10);

        for _ in 0..3 {
            limiter.check(key.clone()).await.unwrap();
        }

        let status = limiter.status(key.clone()).await.unwrap();
        assert_eq!(status.remaining, 7);
    }

    #[tokio::test]
    async fn reset_clears_counter() {
        let limiter = limiter_with_email_limit(2);
        let key = RateLimitKey::email("10.0.0.2");

        for _ in 0..2 {
            limiter.check(key.clone()).await.unwrap();
        }
        assert!(limiter.check(key.clone()).await.unwrap().is_denied());

        limiter.reset(key.clone()).await.unwrap();

        assert!(limiter.check(key.clone()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn empty_client_is_an_invalid_key() {
        let limiter = InMemoryRateLimiter::with_defaults();
        assert!(matches!(
            limiter.check(RateLimitKey::general("")).await,
            Err(RateLimitError::InvalidKey(_))
        ));
    }

    // ─── Independence Tests ──────────────────────────────────────────

    #[tokio::test]
    async fn different_clients_have_independent_limits() {
        let limiter = limiter_with_email_limit(1);

        limiter.check(RateLimitKey::email("1.1.1.1")).await.unwrap();
        assert!(limiter.check(RateLimitKey::email("1.1.1.1")).await.unwrap().is_denied());
        assert!(limiter.check(RateLimitKey::email("2.2.2.2")).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn resources_have_independent_budgets() {
        let limiter = limiter_with_email_limit(1);

        limiter.check(RateLimitKey::email("1.1.1.1")).await.unwrap();
        assert!(limiter.check(RateLimitKey::email("1.1.1.1")).await.unwrap().is_denied());
        assert!(limiter.check(RateLimitKey::general("1.1.1.1")).await.unwrap().is_allowed());
        assert!(limiter.check(RateLimitKey::ai("1.1.1.1")).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn status_uses_resource_window() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let general = limiter.status(RateLimitKey::general("x")).await.unwrap();
        let ai = limiter.status(RateLimitKey::ai("x")).await.unwrap();

        assert_eq!((general.limit, general.window_secs), (100, 900));
        assert_eq!((ai.limit, ai.window_secs), (10, 60));
    }

    // ─── Remaining Counter Accuracy Tests ────────────────────────────

    #[tokio::test]
    async fn remaining_decrements_correctly() {
        let limiter = limiter_with_email_limit(5);
        let key = RateLimitKey::email("test-ip");

        for expected_remaining in (0..5u32).rev() {
            match limiter.check(key.clone()).await.unwrap() {
                RateLimitResult::Allowed(status) => assert_eq!(status.remaining, expected_remaining),
                RateLimitResult::Denied(_) => panic!("should be allowed"),
            }
        }
    }

    #[tokio::test]
    async fn purge_keeps_live_windows() {
        let limiter = InMemoryRateLimiter::with_defaults();
        limiter.check(RateLimitKey::general("a")).await.unwrap();
        assert_eq!(limiter.purge_expired().await, 0);
        assert_eq!(limiter.status(RateLimitKey::general("a")).await.unwrap().remaining, 99);
    }
}
