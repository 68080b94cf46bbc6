//! HTTP handlers for audit endpoints.
//!
//! These handlers connect Axum routes to the audit command handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::adapters::ai::{OpenAIConfig, OpenAIProvider};
use crate::adapters::email::{ResendConfig, ResendEmailSender};
use crate::adapters::render::{render_artifact, EmailHtmlRenderer};
use crate::application::handlers::audit::{
    AuditSession, DeliverySettings, GenerateNarrativeCommand, GenerateNarrativeHandler,
    NarrativeError, NarrativeSettings, SendReportCommand, SendReportError, SendReportHandler,
    SubmitAuditCommand, SubmitAuditHandler, SubmitError,
};
use crate::config::AppConfig;
use crate::domain::assessment::assess_all;
use crate::domain::report::build;
use crate::ports::{AIProvider, EmailSender, RenderError, RenderFormat};

use super::dto::{
    AssessRequest, ErrorResponse, GenerateSummaryRequest, HealthResponse, RenderQuery,
    RenderReportRequest, SendReportRequest, SubmitAuditRequest, SuccessResponse,
    SummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the audit endpoints.
///
/// Cloned for each request; the handlers inside are Arc-wrapped.
#[derive(Clone)]
pub struct AuditAppState {
    pub narrative: Arc<GenerateNarrativeHandler>,
    pub delivery: Arc<SendReportHandler<EmailHtmlRenderer>>,
    pub submit: Arc<SubmitAuditHandler<EmailHtmlRenderer>>,
    pub submissions: SubmissionRegistry,
}

impl AuditAppState {
    /// Wires the handlers around the given providers. `None` means the
    /// credential is missing and the dependent operations report a
    /// configuration error.
    pub fn new(
        ai: Option<Arc<dyn AIProvider>>,
        email: Option<Arc<dyn EmailSender>>,
        narrative_settings: NarrativeSettings,
        delivery_settings: DeliverySettings,
    ) -> Self {
        let narrative = || GenerateNarrativeHandler::new(ai.clone(), narrative_settings.clone());
        let delivery = || {
            SendReportHandler::new(email.clone(), EmailHtmlRenderer, delivery_settings.clone())
        };

        Self {
            narrative: Arc::new(narrative()),
            delivery: Arc::new(delivery()),
            submit: Arc::new(SubmitAuditHandler::new(narrative(), delivery())),
            submissions: SubmissionRegistry::default(),
        }
    }

    /// Builds the OpenAI and Resend adapters from configuration.
    ///
    /// A missing credential leaves that provider unset. A provider whose
    /// HTTP client cannot be built is logged and treated the same way.
    pub fn from_config(config: &AppConfig) -> Self {
        let ai: Option<Arc<dyn AIProvider>> = match config.ai.api_key() {
            Some(key) => {
                let provider_config = OpenAIConfig::from_secret(key.clone())
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout());
                match OpenAIProvider::new(provider_config) {
                    Ok(provider) => Some(Arc::new(provider)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to initialize OpenAI provider");
                        None
                    }
                }
            }
            None => {
                tracing::warn!("OpenAI API key not set, AI summaries will be unavailable");
                None
            }
        };

        let email: Option<Arc<dyn EmailSender>> = match config.email.api_key() {
            Some(key) => {
                let sender_config =
                    ResendConfig::new(key.clone()).with_base_url(config.email.base_url.clone());
                match ResendEmailSender::new(sender_config) {
                    Ok(sender) => Some(Arc::new(sender)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to initialize Resend sender");
                        None
                    }
                }
            }
            None => {
                tracing::warn!("Resend API key not set, report emails will be unavailable");
                None
            }
        };

        let narrative_settings = NarrativeSettings {
            temperature: config.ai.temperature,
            timeout: config.ai.timeout(),
            max_retries: config.ai.max_retries,
            retry_base_delay: config.ai.retry_base_delay(),
            deadline: config.narrative_deadline(),
            ..NarrativeSettings::default()
        };
        let delivery_settings = DeliverySettings {
            from: config.email.from_header(),
            admin_email: config
                .email
                .admin_email
                .clone()
                .filter(|a| !a.trim().is_empty()),
            subject: config.email.subject.clone(),
        };

        Self::new(ai, email, narrative_settings, delivery_settings)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Submission Registry
// ════════════════════════════════════════════════════════════════════════════════

/// Sessions currently being submitted, keyed by the client's submission id.
#[derive(Clone, Default)]
pub struct SubmissionRegistry {
    active: Arc<Mutex<HashMap<Uuid, Arc<AuditSession>>>>,
}

impl SubmissionRegistry {
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<AuditSession>>> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers `session` under its id for the lifetime of the returned lease.
    pub fn open(&self, session: AuditSession) -> Result<SessionLease, SubmitError> {
        let mut active = self.lock();
        if active.contains_key(&session.id()) {
            return Err(SubmitError::InProgress);
        }
        let session = Arc::new(session);
        active.insert(session.id(), session.clone());
        Ok(SessionLease {
            registry: self.clone(),
            session,
        })
    }

    pub fn is_active(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Removes its session from the registry when dropped.
pub struct SessionLease {
    registry: SubmissionRegistry,
    session: Arc<AuditSession>,
}

impl SessionLease {
    pub fn session(&self) -> &AuditSession {
        &self.session
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.session.id());
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /api/generateAiSummary - Narrative for a score digest
pub async fn generate_ai_summary(
    State(state): State<AuditAppState>,
    payload: Result<Json<GenerateSummaryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuditApiError> {
    let Json(request) = payload?;
    let context = request.context();
    let scores = request.scores.ok_or(AuditApiError::MissingScores)?;

    let narrative = state
        .narrative
        .handle(GenerateNarrativeCommand {
            scores,
            context,
            trace_id: Uuid::new_v4().to_string(),
        })
        .await?;

    Ok(Json(SummaryResponse {
        summary: narrative.text,
    }))
}

/// POST /api/send-report - Email a completed report
pub async fn send_report(
    State(state): State<AuditAppState>,
    payload: Result<Json<SendReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuditApiError> {
    let Json(request) = payload?;
    let user_email = request
        .user_email
        .filter(|e| !e.trim().is_empty())
        .ok_or(AuditApiError::MissingFields("userEmail"))?;
    let report = request.report.ok_or(AuditApiError::MissingFields("report"))?;

    state
        .delivery
        .handle(SendReportCommand {
            user_email,
            user_name: request.user_name,
            report,
            pain_point: request.pain_point,
            tech_readiness: request.tech_readiness,
        })
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/assess - Score a set of answers
pub async fn assess(
    payload: Result<Json<AssessRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuditApiError> {
    let Json(request) = payload?;
    Ok(Json(assess_all(&request.answers)))
}

/// POST /api/report/render?format=ui|html|pdf|text - Render a report
pub async fn render_report(
    Query(query): Query<RenderQuery>,
    payload: Result<Json<RenderReportRequest>, JsonRejection>,
) -> Result<Response, AuditApiError> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<RenderFormat>()?,
        None => RenderFormat::Ui,
    };
    let Json(request) = payload?;

    let formatted = build(&request.report, &request.options());
    let artifact = render_artifact(format, &formatted)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(artifact.content_type),
    );
    if let Some(filename) = &artifact.filename {
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((StatusCode::OK, headers, artifact.body).into_response())
}

/// POST /api/audit/submit - Assess, narrate, and deliver in one call
pub async fn submit_audit(
    State(state): State<AuditAppState>,
    payload: Result<Json<SubmitAuditRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuditApiError> {
    let Json(request) = payload?;
    let cmd = SubmitAuditCommand {
        user_email: request.user_email,
        user_name: request.user_name,
        trace_id: Uuid::new_v4().to_string(),
    };

    let outcome = match request.submission_id {
        Some(id) => {
            let lease = state
                .submissions
                .open(AuditSession::with_id(id, request.answers))?;
            state.submit.handle(lease.session(), cmd).await?
        }
        None => {
            let session = AuditSession::new(request.answers);
            state.submit.handle(&session, cmd).await?
        }
    };

    Ok(Json(outcome))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

const CONFIGURATION_MESSAGE: &str =
    "This service is temporarily unavailable. Please try again later.";

/// API error type that converts application errors to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AuditApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("scores are required")]
    MissingScores,

    #[error("missing required field: {0}")]
    MissingFields(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("submission already in progress")]
    InProgress,
}

impl From<JsonRejection> for AuditApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<NarrativeError> for AuditApiError {
    fn from(err: NarrativeError) -> Self {
        match err {
            NarrativeError::NotConfigured => Self::NotConfigured("AI provider"),
        }
    }
}

impl From<SendReportError> for AuditApiError {
    fn from(err: SendReportError) -> Self {
        match err {
            SendReportError::MissingField(field) => Self::MissingFields(field),
            SendReportError::InvalidEmail(email) => Self::InvalidEmail(email),
            SendReportError::NotConfigured => Self::NotConfigured("email delivery"),
            SendReportError::Render(e) => Self::Render(e),
            SendReportError::Delivery(e) => Self::Delivery(e.to_string()),
        }
    }
}

impl From<SubmitError> for AuditApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::InProgress => Self::InProgress,
            SubmitError::InvalidEmail(email) => Self::InvalidEmail(email),
        }
    }
}

impl IntoResponse for AuditApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AuditApiError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                format!("Invalid request body: {}", detail),
            ),
            AuditApiError::MissingScores => (
                StatusCode::BAD_REQUEST,
                "MISSING_SCORES",
                "Scores are required".to_string(),
            ),
            AuditApiError::MissingFields(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELDS",
                format!("Missing required field: {}", field),
            ),
            AuditApiError::InvalidEmail(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_EMAIL",
                "Please provide a valid email address".to_string(),
            ),
            AuditApiError::NotConfigured(service) => {
                tracing::error!(service, "Request failed: service not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    CONFIGURATION_MESSAGE.to_string(),
                )
            }
            AuditApiError::Delivery(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DELIVERY_FAILED",
                "Failed to send the report email".to_string(),
            ),
            AuditApiError::Render(RenderError::UnsupportedFormat(format)) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported report format: {}", format),
            ),
            AuditApiError::Render(e) => {
                tracing::error!(error = %e, "Report rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "The report could not be rendered".to_string(),
                )
            }
            AuditApiError::InProgress => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_PROGRESS",
                "This audit is already being submitted".to_string(),
            ),
        };

        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}
