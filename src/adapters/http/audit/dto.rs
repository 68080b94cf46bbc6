//! HTTP DTOs (Data Transfer Objects) for audit endpoints.
//!
//! These types define the JSON request/response structure for the audit API.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::assessment::{AnswerSet, AuditContext, AuditReport};
use crate::domain::narrative::ScoreSummary;
use crate::domain::report::ReportOptions;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to generate the executive-summary narrative.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryRequest {
    /// Score digest; required.
    #[serde(default)]
    pub scores: Option<ScoreSummary>,
    #[serde(default)]
    pub key_challenge: Option<String>,
    #[serde(default)]
    pub tech_readiness: Option<String>,
    #[serde(default)]
    pub pain_point: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub team_size: Option<String>,
}

impl GenerateSummaryRequest {
    /// The free-text context carried alongside the scores.
    pub fn context(&self) -> AuditContext {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        AuditContext {
            pain_point: clean(&self.pain_point),
            tech_readiness: clean(&self.tech_readiness),
            business_type: clean(&self.business_type),
            team_size: clean(&self.team_size),
            key_challenge: clean(&self.key_challenge),
        }
    }
}

/// Request to email a completed report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReportRequest {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub report: Option<AuditReport>,
    #[serde(default)]
    pub pain_point: Option<String>,
    #[serde(default)]
    pub tech_readiness: Option<String>,
}

/// Request to score a set of answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

/// Request to render a report into one output format.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReportRequest {
    pub report: AuditReport,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub pain_point: Option<String>,
    #[serde(default)]
    pub tech_readiness: Option<String>,
}

impl RenderReportRequest {
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            user_email: self.user_email.clone(),
            user_name: self.user_name.clone(),
            pain_point: self.pain_point.clone(),
            tech_readiness: self.tech_readiness.clone(),
        }
    }
}

/// `?format=` query for the render endpoint. Defaults to the UI tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// Request to run the whole session flow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAuditRequest {
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// Client-chosen id; repeated submits with the same id while one is
    /// running are rejected.
    #[serde(default)]
    pub submission_id: Option<Uuid>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
