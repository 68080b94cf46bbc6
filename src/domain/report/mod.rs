//! Report Module - The canonical, renderer-agnostic report model.
//!
//! - `section` - `FormattedReport`, `ReportSection` and their typed contents
//! - `builder` - Assembles a `FormattedReport` from an `AuditReport`
//! - `personalization` - Fallback summary text when no narrative exists

pub mod builder;
pub mod personalization;
mod section;

pub use builder::{build, build_at, ReportOptions, BOOKING_URL, COMPANY_NAME};
pub use personalization::{framing, personalized_summary, Framing};
pub use section::{
    CategoryContent, CtaContent, FooterContent, FormattedReport, HeaderContent, MetricsContent,
    ReportMetadata, ReportSection, SectionContent, SectionType, StructureViolation,
    SummaryContent, SummaryVariant,
};
