//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI retries can take {worst_case_secs}s, longer than the {request_timeout_secs}s request timeout")]
    AiBudgetExceedsRequestTimeout {
        worst_case_secs: u64,
        request_timeout_secs: u64,
    },

    #[error("Retry base delay exceeds 60 seconds")]
    RetryDelayTooLarge,

    #[error("AI temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid admin email address")]
    InvalidAdminEmail,

    #[error("Rate limit for {0} must allow at least one request per non-empty window")]
    InvalidRateLimit(&'static str),
}
