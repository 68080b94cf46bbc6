//! HTTP adapter for audit endpoints.
//!
//! Exposes the audit flow via REST API:
//! - `POST /api/generateAiSummary` - Executive-summary narrative
//! - `POST /api/send-report` - Email a completed report
//! - `POST /api/assess` - Score answers into a report
//! - `POST /api/report/render` - Render a report as UI tree, HTML, PDF or text
//! - `POST /api/audit/submit` - End-to-end session submission
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuditApiError, AuditAppState, SessionLease, SubmissionRegistry};
pub use routes::{audit_router, audit_routes};
