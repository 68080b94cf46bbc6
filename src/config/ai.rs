//! AI narrative configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the retry base delay
const MAX_RETRY_BASE_DELAY_MS: u64 = 60_000;

/// AI provider configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; narrative requests fail with a configuration error without it
    pub openai_api_key: Option<Secret<String>>,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Timeout per attempt in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get retry base delay as Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Longest a narrative can take: every attempt times out and every
    /// backoff (`base * 2^n`) is slept.
    pub fn worst_case_duration(&self) -> Duration {
        (0..self.max_retries).fold(
            self.timeout().saturating_mul(self.max_retries.saturating_add(1)),
            |total, retry| {
                total.saturating_add(
                    self.retry_base_delay()
                        .saturating_mul(2u32.saturating_pow(retry)),
                )
            },
        )
    }

    /// The API key, if one is set and non-empty
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.openai_api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.retry_base_delay_ms > MAX_RETRY_BASE_DELAY_MS {
            return Err(ValidationError::RetryDelayTooLarge);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

fn default_retry_base_delay() -> u64 {
    3_000
}
