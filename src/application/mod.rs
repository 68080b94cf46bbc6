//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Upstream failures are absorbed here: the AI narrative degrades to a
//! templated fallback and delivery problems become status flags.

pub mod handlers;

pub use handlers::audit::{
    AuditSession, DeliverySettings, DeliveryStatus, GenerateNarrativeCommand,
    GenerateNarrativeHandler, NarrativeSettings, NarrativeSource, SendReportCommand,
    SendReportHandler, SubmitAuditCommand, SubmitAuditHandler, SubmitError, SubmitOutcome,
};
