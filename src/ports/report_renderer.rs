//! Report Renderer Port - Projects the canonical report into one output format.
//!
//! A renderer supplies one method per section type plus `combine`. The
//! provided `render` method checks the section structure, walks the sections
//! in order, dispatches by type, and combines the fragments. Any error stops
//! the walk: a broken render never yields a partial artifact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::report::{
    CategoryContent, CtaContent, FooterContent, FormattedReport, HeaderContent, MetricsContent,
    ReportMetadata, ReportSection, SectionContent, StructureViolation, SummaryContent,
};

/// Port for report renderers.
pub trait ReportRenderer: Send + Sync {
    /// Format-native piece produced for one section.
    type Fragment;
    /// The finished artifact.
    type Output;

    fn render_header(
        &self,
        section: &ReportSection,
        content: &HeaderContent,
    ) -> Result<Self::Fragment, RenderError>;

    fn render_summary(
        &self,
        section: &ReportSection,
        content: &SummaryContent,
    ) -> Result<Self::Fragment, RenderError>;

    fn render_metrics(
        &self,
        section: &ReportSection,
        content: &MetricsContent,
    ) -> Result<Self::Fragment, RenderError>;

    fn render_category(
        &self,
        section: &ReportSection,
        content: &CategoryContent,
    ) -> Result<Self::Fragment, RenderError>;

    fn render_cta(
        &self,
        section: &ReportSection,
        content: &CtaContent,
    ) -> Result<Self::Fragment, RenderError>;

    fn render_footer(
        &self,
        section: &ReportSection,
        content: &FooterContent,
    ) -> Result<Self::Fragment, RenderError>;

    /// Assembles the fragments, in section order, into the output.
    fn combine(
        &self,
        fragments: Vec<Self::Fragment>,
        metadata: &ReportMetadata,
    ) -> Result<Self::Output, RenderError>;

    /// Renders a whole report.
    fn render(&self, report: &FormattedReport) -> Result<Self::Output, RenderError> {
        report.check_structure()?;

        let mut fragments = Vec::with_capacity(report.sections.len());
        for section in &report.sections {
            let fragment = match &section.content {
                SectionContent::Header(c) => self.render_header(section, c)?,
                SectionContent::Summary(c) => self.render_summary(section, c)?,
                SectionContent::Metrics(c) => self.render_metrics(section, c)?,
                SectionContent::Category(c) => self.render_category(section, c)?,
                SectionContent::Cta(c) => self.render_cta(section, c)?,
                SectionContent::Footer(c) => self.render_footer(section, c)?,
            };
            fragments.push(fragment);
        }

        self.combine(fragments, &report.metadata)
    }
}

/// Output formats exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// JSON view tree for the web client.
    Ui,
    /// Self-contained HTML email body.
    Html,
    Pdf,
    /// Downloadable plaintext report.
    Text,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Ui => "ui",
            RenderFormat::Html => "html",
            RenderFormat::Pdf => "pdf",
            RenderFormat::Text => "text",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RenderFormat::Ui => "application/json",
            RenderFormat::Html => "text/html; charset=utf-8",
            RenderFormat::Pdf => "application/pdf",
            RenderFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Download filename for formats served as attachments.
    pub fn attachment_name(&self, company: &str) -> Option<String> {
        let extension = match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Text => "txt",
            RenderFormat::Ui | RenderFormat::Html => return None,
        };
        let company: String = company
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        Some(format!("{}_workflow_audit_report.{}", company, extension))
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ui" => Ok(RenderFormat::Ui),
            "html" => Ok(RenderFormat::Html),
            "pdf" => Ok(RenderFormat::Pdf),
            "text" | "txt" => Ok(RenderFormat::Text),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Rendering errors. These always propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("malformed report structure: {0}")]
    Structure(String),

    #[error("malformed section {section_id}: {reason}")]
    MalformedSection { section_id: String, reason: String },

    #[error("unsupported render format: {0}")]
    UnsupportedFormat(String),

    #[error("render backend failed: {0}")]
    Backend(String),
}

impl RenderError {
    pub fn malformed(section: &ReportSection, reason: impl Into<String>) -> Self {
        RenderError::MalformedSection {
            section_id: section.id.clone(),
            reason: reason.into(),
        }
    }
}

impl From<StructureViolation> for RenderError {
    fn from(violation: StructureViolation) -> Self {
        RenderError::Structure(violation.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};
    use crate::domain::report::{build, ReportOptions, SectionType};

    /// Records the section types it saw, in order.
    struct TypeRecorder;

    impl ReportRenderer for TypeRecorder {
        type Fragment = SectionType;
        type Output = Vec<SectionType>;

        fn render_header(&self, _: &ReportSection, _: &HeaderContent) -> Result<SectionType, RenderError> {
            Ok(SectionType::Header)
        }
        fn render_summary(&self, _: &ReportSection, _: &SummaryContent) -> Result<SectionType, RenderError> {
            Ok(SectionType::Summary)
        }
        fn render_metrics(&self, _: &ReportSection, _: &MetricsContent) -> Result<SectionType, RenderError> {
            Ok(SectionType::Metrics)
        }
        fn render_category(&self, section: &ReportSection, c: &CategoryContent) -> Result<SectionType, RenderError> {
            if c.tools.is_empty() {
                return Err(RenderError::malformed(section, "no tools"));
            }
            Ok(SectionType::Category)
        }
        fn render_cta(&self, _: &ReportSection, _: &CtaContent) -> Result<SectionType, RenderError> {
            Ok(SectionType::Cta)
        }
        fn render_footer(&self, _: &ReportSection, _: &FooterContent) -> Result<SectionType, RenderError> {
            Ok(SectionType::Footer)
        }
        fn combine(&self, fragments: Vec<SectionType>, _: &ReportMetadata) -> Result<Vec<SectionType>, RenderError> {
            Ok(fragments)
        }
    }

    fn sample() -> FormattedReport {
        build(&assess_all(&AnswerSet::new()), &ReportOptions::default())
    }

    #[test]
    fn render_walks_sections_in_order() {
        let report = sample();
        let seen = TypeRecorder.render(&report).unwrap();
        let expected: Vec<SectionType> = report.sections.iter().map(|s| s.section_type()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn structural_problems_fail_the_render() {
        let mut report = sample();
        report.sections.reverse();
        assert!(matches!(TypeRecorder.render(&report), Err(RenderError::Structure(_))));
    }

    #[test]
    fn section_errors_propagate() {
        let mut report = sample();
        for section in &mut report.sections {
            if let SectionContent::Category(c) = &mut section.content {
                c.tools.clear();
            }
        }
        assert!(matches!(
            TypeRecorder.render(&report),
            Err(RenderError::MalformedSection { .. })
        ));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PDF".parse::<RenderFormat>().unwrap(), RenderFormat::Pdf);
        assert_eq!("txt".parse::<RenderFormat>().unwrap(), RenderFormat::Text);
        assert!("docx".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn attachment_names_follow_company_pattern() {
        assert_eq!(
            RenderFormat::Pdf.attachment_name("Automate Forward").as_deref(),
            Some("Automate_Forward_workflow_audit_report.pdf")
        );
        assert_eq!(
            RenderFormat::Text.attachment_name("Acme").as_deref(),
            Some("Acme_workflow_audit_report.txt")
        );
        assert!(RenderFormat::Html.attachment_name("Acme").is_none());
    }
}
