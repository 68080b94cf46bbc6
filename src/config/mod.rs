//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WORKFLOW_AUDIT` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so the service starts with no environment at
//! all. Provider credentials are optional here; requests that need a missing
//! credential fail with a configuration error at request time.
//!
//! # Example
//!
//! ```no_run
//! use workflow_audit::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod email;
mod error;
mod rate_limit;
mod server;

pub use ai::AiConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use rate_limit::{RateLimitConfig, WindowLimit};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI narrative configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Per-client rate limits
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WORKFLOW_AUDIT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WORKFLOW_AUDIT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WORKFLOW_AUDIT__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    /// - `WORKFLOW_AUDIT__RATE_LIMIT__EMAIL__MAX_REQUESTS=5` -> `rate_limit.email.max_requests = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WORKFLOW_AUDIT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.email.validate()?;
        self.rate_limit.validate()?;

        let worst_case = self.ai.worst_case_duration();
        if worst_case >= self.server.request_timeout() {
            return Err(ValidationError::AiBudgetExceedsRequestTimeout {
                worst_case_secs: worst_case.as_secs(),
                request_timeout_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Overall bound for narrative generation, kept inside the request
    /// timeout so the fallback reaches the client before the 408.
    pub fn narrative_deadline(&self) -> Duration {
        self.server.request_timeout().mul_f64(0.9)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
