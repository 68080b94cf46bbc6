//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::RateLimitResource;

/// Per-client limits for each rate-limited resource
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Every API request
    #[serde(default = "default_general")]
    pub general: WindowLimit,

    /// Report delivery (`/api/send-report`, `/api/audit/submit`)
    #[serde(default = "default_email")]
    pub email: WindowLimit,

    /// AI narrative generation
    #[serde(default = "default_ai")]
    pub ai: WindowLimit,
}

/// A fixed window: at most `max_requests` per `window_secs`
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct WindowLimit {
    pub max_requests: u32,
    pub window_secs: u32,
}

impl WindowLimit {
    pub const fn new(max_requests: u32, window_secs: u32) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }
}

impl RateLimitConfig {
    /// Limit applying to a resource
    pub fn limit_for(&self, resource: RateLimitResource) -> WindowLimit {
        match resource {
            RateLimitResource::General => self.general,
            RateLimitResource::Email => self.email,
            RateLimitResource::Ai => self.ai,
        }
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, limit) in [
            ("general", self.general),
            ("email", self.email),
            ("ai", self.ai),
        ] {
            if limit.max_requests == 0 || limit.window_secs == 0 {
                return Err(ValidationError::InvalidRateLimit(name));
            }
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general: default_general(),
            email: default_email(),
            ai: default_ai(),
        }
    }
}

fn default_general() -> WindowLimit {
    WindowLimit::new(100, 900)
}

fn default_email() -> WindowLimit {
    WindowLimit::new(5, 60)
}

fn default_ai() -> WindowLimit {
    WindowLimit::new(10, 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general, WindowLimit::new(100, 900));
        assert_eq!(config.email, WindowLimit::new(5, 60));
        assert_eq!(config.ai, WindowLimit::new(10, 60));
    }

    #[test]
    fn test_limit_for_resource() {
        let config = RateLimitConfig::default();
        assert_eq!(config.limit_for(RateLimitResource::Email).max_requests, 5);
        assert_eq!(config.limit_for(RateLimitResource::General).window_secs, 900);
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let config = RateLimitConfig {
            email: WindowLimit::new(0, 60),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRateLimit("email"))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let config = RateLimitConfig {
            ai: WindowLimit::new(10, 0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(RateLimitConfig::default().validate().is_ok());
    }
}
