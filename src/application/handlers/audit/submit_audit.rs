//! AuditSession and SubmitAuditHandler - the end-to-end "generate and send" flow.
//!
//! Flow: assess → narrative (AI, else fallback) → attach narrative →
//! render email → deliver. The report is always returned; narrative and
//! delivery problems only show up as status flags on the outcome.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use uuid::Uuid;

use super::generate_narrative::{
    GenerateNarrativeCommand, GenerateNarrativeHandler, Narrative, NarrativeError, NarrativeSource,
};
use super::send_report::{is_valid_email, SendReportCommand, SendReportError, SendReportHandler};
use crate::domain::assessment::{assess_all, Answer, AnswerSet, AuditContext, AuditReport};
use crate::domain::narrative::ScoreSummary;
use crate::ports::ReportRenderer;

/// One user's wizard session: the collected answers and the submission guard.
#[derive(Debug)]
pub struct AuditSession {
    id: Uuid,
    answers: AnswerSet,
    submitting: AtomicBool,
}

impl AuditSession {
    pub fn new(answers: AnswerSet) -> Self {
        Self::with_id(Uuid::new_v4(), answers)
    }

    pub fn with_id(id: Uuid, answers: AnswerSet) -> Self {
        Self {
            id,
            answers,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Records an answer, replacing any earlier answer to the same question.
    pub fn record(&mut self, answer: Answer) {
        self.answers.record(answer);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Claims the submission flag. The flag is released when the guard drops,
    /// on success, error, or cancellation alike.
    pub fn begin_submission(&self) -> Result<SubmissionGuard<'_>, SubmitError> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitError::InProgress)?;
        Ok(SubmissionGuard {
            flag: &self.submitting,
        })
    }
}

/// Releases the session's submission flag on drop.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    /// No recipient address was given.
    Skipped,
}

/// Result of a submission: the report plus non-blocking status flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub session_id: Uuid,
    pub report: AuditReport,
    pub narrative_source: NarrativeSource,
    pub delivery: DeliveryStatus,
    /// User-facing notices about degraded channels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitAuditCommand {
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub trace_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission for this session is already in progress")]
    InProgress,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

const DELIVERY_NOTICE: &str =
    "We couldn't email your report right now. Your results are shown below.";

/// Handler for the full submission flow.
pub struct SubmitAuditHandler<R> {
    narrative: GenerateNarrativeHandler,
    delivery: SendReportHandler<R>,
}

impl<R> SubmitAuditHandler<R>
where
    R: ReportRenderer<Output = String>,
{
    pub fn new(narrative: GenerateNarrativeHandler, delivery: SendReportHandler<R>) -> Self {
        Self {
            narrative,
            delivery,
        }
    }

    pub async fn handle(
        &self,
        session: &AuditSession,
        cmd: SubmitAuditCommand,
    ) -> Result<SubmitOutcome, SubmitError> {
        let recipient = cmd
            .user_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        if let Some(email) = recipient.as_deref() {
            if !is_valid_email(email) {
                return Err(SubmitError::InvalidEmail(email.to_string()));
            }
        }

        let _guard = session.begin_submission()?;

        let report = assess_all(session.answers());
        let context = AuditContext::from_answers(session.answers());
        let scores = ScoreSummary::from_report(&report);

        let narrative = match self
            .narrative
            .handle(GenerateNarrativeCommand {
                scores: scores.clone(),
                context: context.clone(),
                trace_id: cmd.trace_id.clone(),
            })
            .await
        {
            Ok(narrative) => narrative,
            Err(NarrativeError::NotConfigured) => {
                tracing::error!(session_id = %session.id(), "AI provider not configured, using fallback narrative");
                Narrative::fallback(&scores, &context)
            }
        };
        let report = report.with_summary(narrative.text);

        let mut notices = Vec::new();
        let delivery = match recipient {
            None => DeliveryStatus::Skipped,
            Some(user_email) => {
                let result = self
                    .delivery
                    .handle(SendReportCommand {
                        user_email,
                        user_name: cmd.user_name,
                        report: report.clone(),
                        pain_point: context.pain_point.clone(),
                        tech_readiness: context.tech_readiness.clone(),
                    })
                    .await;
                match result {
                    Ok(_) => DeliveryStatus::Sent,
                    Err(e) => {
                        match &e {
                            SendReportError::NotConfigured => {
                                tracing::error!(session_id = %session.id(), "Email delivery not configured")
                            }
                            other => {
                                tracing::warn!(session_id = %session.id(), error = %other, "Report delivery failed")
                            }
                        }
                        notices.push(DELIVERY_NOTICE.to_string());
                        DeliveryStatus::Failed
                    }
                }
            }
        };

        Ok(SubmitOutcome {
            session_id: session.id(),
            report,
            narrative_source: narrative.source,
            delivery,
            notices,
        })
    }
}
