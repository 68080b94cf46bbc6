//! SendReportHandler - Emails the rendered report to the customer, with a
//! best-effort copy to the operator.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::assessment::AuditReport;
use crate::domain::report::{build, ReportOptions};
use crate::ports::{DeliveryReceipt, EmailError, EmailMessage, EmailSender, RenderError, ReportRenderer};

/// Sender identity and addressing for report emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    /// Formatted `From` header.
    pub from: String,
    /// Operator address receiving a copy of every report.
    pub admin_email: Option<String>,
    pub subject: String,
}

/// Command to email a completed report.
#[derive(Debug, Clone)]
pub struct SendReportCommand {
    pub user_email: String,
    pub user_name: Option<String>,
    pub report: AuditReport,
    pub pain_point: Option<String>,
    pub tech_readiness: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminCopy {
    Sent,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReportResult {
    pub receipt: DeliveryReceipt,
    pub admin_copy: AdminCopy,
}

#[derive(Debug, thiserror::Error)]
pub enum SendReportError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// No email credential is configured.
    #[error("email delivery is not configured")]
    NotConfigured,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] EmailError),
}

/// Loose syntactic check: one `@`, a non-empty local part, a dotted domain,
/// and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Handler for report delivery.
///
/// The customer email is the operation: if it fails, the command fails.
/// The admin copy is reported in the result but never fails the command.
pub struct SendReportHandler<R> {
    sender: Option<Arc<dyn EmailSender>>,
    renderer: R,
    settings: DeliverySettings,
}

impl<R> SendReportHandler<R>
where
    R: ReportRenderer<Output = String>,
{
    pub fn new(sender: Option<Arc<dyn EmailSender>>, renderer: R, settings: DeliverySettings) -> Self {
        Self {
            sender,
            renderer,
            settings,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }

    pub async fn handle(&self, cmd: SendReportCommand) -> Result<SendReportResult, SendReportError> {
        let recipient = cmd.user_email.trim();
        if recipient.is_empty() {
            return Err(SendReportError::MissingField("userEmail"));
        }
        if !is_valid_email(recipient) {
            return Err(SendReportError::InvalidEmail(recipient.to_string()));
        }
        let sender = self.sender.as_ref().ok_or(SendReportError::NotConfigured)?;

        let options = ReportOptions {
            user_email: Some(recipient.to_string()),
            user_name: cmd.user_name.clone(),
            pain_point: cmd.pain_point,
            tech_readiness: cmd.tech_readiness,
        };
        let html = self.renderer.render(&build(&cmd.report, &options))?;

        let receipt = sender
            .send(EmailMessage::new(
                &self.settings.from,
                recipient,
                &self.settings.subject,
                html.clone(),
            ))
            .await
            .map_err(|e| {
                tracing::error!(recipient, error = %e, "Report email failed");
                e
            })?;
        tracing::info!(recipient, message_id = ?receipt.id, "Report email sent");

        let admin_copy = self.send_admin_copy(sender, recipient, cmd.user_name.as_deref(), html).await;

        Ok(SendReportResult { receipt, admin_copy })
    }

    async fn send_admin_copy(
        &self,
        sender: &Arc<dyn EmailSender>,
        recipient: &str,
        user_name: Option<&str>,
        html: String,
    ) -> AdminCopy {
        let Some(admin) = self
            .settings
            .admin_email
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
        else {
            return AdminCopy::Skipped;
        };

        let who = match user_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{} <{}>", name, recipient),
            None => recipient.to_string(),
        };
        let subject = format!("New workflow audit: {}", who);

        match sender
            .send(EmailMessage::new(&self.settings.from, admin, subject, html))
            .await
        {
            Ok(_) => AdminCopy::Sent,
            Err(e) => {
                tracing::warn!(recipient = admin, error = %e, "Admin copy failed");
                AdminCopy::Failed
            }
        }
    }
}
