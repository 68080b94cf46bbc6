//! Mock email sender for testing.
//!
//! Records every message and can be told to fail for specific recipients,
//! which is how tests exercise the best-effort admin copy.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{DeliveryReceipt, EmailError, EmailMessage, EmailSender};

#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<EmailMessage>,
    failing_recipients: HashSet<String>,
    fail_all: bool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with `Unavailable`.
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.state().fail_all = true;
        sender
    }

    /// Sends addressed to `recipient` fail with `Rejected`.
    pub fn fail_for(self, recipient: impl Into<String>) -> Self {
        self.state().failing_recipients.insert(recipient.into());
        self
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.state().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state().sent.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        let mut state = self.state();
        if state.fail_all {
            return Err(EmailError::Unavailable("mock sender is failing".to_string()));
        }
        if let Some(recipient) = message
            .to
            .iter()
            .find(|to| state.failing_recipients.contains(*to))
        {
            return Err(EmailError::Rejected(format!("mock rejects {}", recipient)));
        }

        state.sent.push(message);
        Ok(DeliveryReceipt {
            id: Some(format!("mock-{}", state.sent.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage::new("from@example.com", to, "Subject", "<p>Body</p>")
    }

    #[tokio::test]
    async fn records_sent_messages() {
        let sender = MockEmailSender::new();
        let receipt = sender.send(message("a@example.com")).await.unwrap();

        assert_eq!(receipt.id.as_deref(), Some("mock-1"));
        assert_eq!(sender.sent_count(), 1);
        assert_eq!(sender.sent()[0].to[0], "a@example.com");
    }

    #[tokio::test]
    async fn fails_for_configured_recipient_only() {
        let sender = MockEmailSender::new().fail_for("admin@example.com");

        assert!(sender.send(message("admin@example.com")).await.is_err());
        assert!(sender.send(message("user@example.com")).await.is_ok());
        assert_eq!(sender.sent_count(), 1);
    }

    #[tokio::test]
    async fn failing_sender_rejects_everything() {
        let sender = MockEmailSender::failing();
        assert!(matches!(
            sender.send(message("a@example.com")).await,
            Err(EmailError::Unavailable(_))
        ));
    }
}
