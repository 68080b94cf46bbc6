//! Resend adapter for the EmailSender port.
//!
//! POSTs `{from, to, subject, html}` to `<base_url>/emails` with a bearer key.
//! Any 2xx counts as delivered.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{DeliveryReceipt, EmailError, EmailMessage, EmailSender};

pub const DEFAULT_RESEND_URL: &str = "https://api.resend.com";

/// Configuration for the Resend sender.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_RESEND_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct ResendEmailSender {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmailError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn status_error(status: u16, body: String) -> EmailError {
        match status {
            401 | 403 => EmailError::AuthenticationFailed,
            429 => EmailError::RateLimited,
            400..=499 => EmailError::Rejected(format!("{}: {}", status, body)),
            _ => EmailError::Unavailable(format!("{}: {}", status, body)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        let response = self
            .client
            .post(self.emails_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .json(&message)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status.as_u16(), body));
        }

        // A 2xx with an unexpected body still means the message was accepted.
        let id = response
            .json::<ResendResponse>()
            .await
            .ok()
            .and_then(|r| r.id);
        Ok(DeliveryReceipt { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ResendEmailSender::status_error(401, String::new()),
            EmailError::AuthenticationFailed
        ));
        assert!(matches!(
            ResendEmailSender::status_error(429, String::new()),
            EmailError::RateLimited
        ));
        assert!(matches!(
            ResendEmailSender::status_error(422, "bad to".to_string()),
            EmailError::Rejected(_)
        ));
        assert!(matches!(
            ResendEmailSender::status_error(503, String::new()),
            EmailError::Unavailable(_)
        ));
    }

    #[test]
    fn emails_url_joins_base() {
        let sender = ResendEmailSender::new(
            ResendConfig::new(Secret::new("re_test".to_string())).with_base_url("http://localhost:1/"),
        )
        .unwrap();
        assert_eq!(sender.emails_url(), "http://localhost:1/emails");
    }
}
