//! GenerateNarrativeHandler - AI narrative with bounded retries and a templated fallback.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{sleep, timeout};

use crate::domain::assessment::AuditContext;
use crate::domain::narrative::{fallback_narrative, user_prompt, ScoreSummary, SYSTEM_PROMPT};
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

/// Retry and sampling settings for narrative generation.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on each individual attempt.
    pub timeout: Duration,
    /// Attempts after the first.
    pub max_retries: u32,
    /// Backoff before retry `n` (0-based) is `retry_base_delay * 2^n`.
    pub retry_base_delay: Duration,
    /// Bound on the whole generation, retries and backoff included. Must
    /// finish inside the HTTP request timeout so the fallback is delivered.
    pub deadline: Duration,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 600,
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_base_delay: Duration::from_secs(3),
            deadline: Duration::from_secs(200),
        }
    }
}

impl NarrativeSettings {
    pub fn backoff(&self, retry: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Where a narrative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
}

impl Narrative {
    pub fn fallback(scores: &ScoreSummary, context: &AuditContext) -> Self {
        Self {
            text: fallback_narrative(scores, context),
            source: NarrativeSource::Fallback,
        }
    }
}

/// Command to generate the executive-summary narrative.
#[derive(Debug, Clone)]
pub struct GenerateNarrativeCommand {
    pub scores: ScoreSummary,
    pub context: AuditContext,
    /// Correlates provider calls with the originating request.
    pub trace_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    /// No AI credential is configured.
    #[error("AI provider is not configured")]
    NotConfigured,
}

/// Handler for narrative generation.
///
/// Upstream failures never surface: once retries are exhausted, or on a
/// non-retryable error, the deterministic fallback narrative is returned.
/// The only error is a missing provider.
pub struct GenerateNarrativeHandler {
    provider: Option<Arc<dyn AIProvider>>,
    settings: NarrativeSettings,
}

impl GenerateNarrativeHandler {
    pub fn new(provider: Option<Arc<dyn AIProvider>>, settings: NarrativeSettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn handle(&self, cmd: GenerateNarrativeCommand) -> Result<Narrative, NarrativeError> {
        let provider = self.provider.as_ref().ok_or(NarrativeError::NotConfigured)?;

        let request = CompletionRequest::new(RequestMetadata::new(&cmd.trace_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_prompt(user_prompt(&cmd.scores, &cmd.context))
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let info = provider.provider_info();
        let attempts = self.attempts(provider.as_ref(), request, &info.name);

        let error = match timeout(self.settings.deadline, attempts).await {
            Ok(Ok(text)) => {
                return Ok(Narrative {
                    text,
                    source: NarrativeSource::Ai,
                })
            }
            Ok(Err(error)) => error,
            Err(_) => AIError::Timeout {
                timeout_secs: self.settings.deadline.as_secs() as u32,
            },
        };

        tracing::warn!(
            provider = %info.name,
            error = %error,
            trace_id = %cmd.trace_id,
            "AI narrative failed, using fallback"
        );
        Ok(Narrative::fallback(&cmd.scores, &cmd.context))
    }

    /// Runs attempts until one yields text or the retry budget is spent.
    async fn attempts(
        &self,
        provider: &dyn AIProvider,
        request: CompletionRequest,
        provider_name: &str,
    ) -> Result<String, AIError> {
        let mut attempt: u32 = 0;

        loop {
            let result = match timeout(self.settings.timeout, provider.complete(request.clone())).await {
                Ok(result) => result,
                // Dropping the future aborts the in-flight call.
                Err(_) => Err(AIError::Timeout {
                    timeout_secs: self.settings.timeout.as_secs() as u32,
                }),
            };

            let error = match result {
                Ok(response) => {
                    let text = response.content.trim();
                    if !text.is_empty() {
                        tracing::debug!(
                            provider = %provider_name,
                            model = %response.model,
                            attempt,
                            tokens = response.usage.total_tokens,
                            finish_reason = ?response.finish_reason,
                            "AI narrative generated"
                        );
                        return Ok(text.to_string());
                    }
                    AIError::EmptyResponse
                }
                Err(e) => e,
            };

            if !error.is_retryable() || attempt >= self.settings.max_retries {
                return Err(error);
            }

            let delay = self.settings.backoff(attempt);
            tracing::info!(
                provider = %provider_name,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying AI narrative"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}
