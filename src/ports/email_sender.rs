//! Email Sender Port - Interface for transactional email delivery.

use async_trait::async_trait;
use serde::Serialize;

/// Port for sending one HTML email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends the message. Any 2xx from the provider counts as delivered.
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, EmailError>;
}

/// An outgoing HTML email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    /// Formatted sender, e.g. `Automate Forward <reports@example.com>`.
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Provider acknowledgement for a delivered message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider message id, when the provider returns one.
    pub id: Option<String>,
}

/// Email delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email provider rejected credentials")]
    AuthenticationFailed,

    #[error("email provider rejected the message: {0}")]
    Rejected(String),

    #[error("email provider rate limited the request")]
    RateLimited,

    #[error("email provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_has_single_recipient() {
        let message = EmailMessage::new("a <a@x.com>", "b@y.com", "Hi", "<p>Hi</p>");
        assert_eq!(message.to, vec!["b@y.com".to_string()]);
    }

    #[test]
    fn message_serializes_provider_fields() {
        let message = EmailMessage::new("a@x.com", "b@y.com", "Subject", "<p>Body</p>");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["from"], "a@x.com");
        assert_eq!(json["to"][0], "b@y.com");
        assert_eq!(json["subject"], "Subject");
        assert_eq!(json["html"], "<p>Body</p>");
    }
}
