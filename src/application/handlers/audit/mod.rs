//! Audit handlers.
//!
//! ## Commands
//! - Generating the executive-summary narrative (AI with fallback)
//! - Emailing a completed report
//! - Submitting a session end to end (assess, narrate, deliver)

mod generate_narrative;
mod send_report;
mod submit_audit;

pub use generate_narrative::{
    GenerateNarrativeCommand, GenerateNarrativeHandler, Narrative, NarrativeError,
    NarrativeSettings, NarrativeSource,
};
pub use send_report::{
    is_valid_email, AdminCopy, DeliverySettings, SendReportCommand, SendReportError,
    SendReportHandler, SendReportResult,
};
pub use submit_audit::{
    AuditSession, DeliveryStatus, SubmissionGuard, SubmitAuditCommand, SubmitAuditHandler,
    SubmitError, SubmitOutcome,
};
