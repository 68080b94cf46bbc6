//! Email configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key; delivery fails with a configuration error without it
    pub resend_api_key: Option<Secret<String>>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Operator address receiving a copy of every report
    pub admin_email: Option<String>,

    /// Resend API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Subject line of the customer email
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// The API key, if one is set and non-empty
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.resend_api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.api_key() {
            if !key.expose_secret().starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if let Some(admin) = self.admin_email.as_deref().filter(|a| !a.trim().is_empty()) {
            if !admin.contains('@') {
                return Err(ValidationError::InvalidAdminEmail);
            }
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_email: None,
            base_url: default_base_url(),
            subject: default_subject(),
        }
    }
}

fn default_from_email() -> String {
    "reports@automateforward.com".to_string()
}

fn default_from_name() -> String {
    "Automate Forward".to_string()
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_subject() -> String {
    "Your Workflow Automation Audit Report".to_string()
}
