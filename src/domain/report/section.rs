//! The canonical report model shared by every renderer.
//!
//! A `FormattedReport` is an ordered list of typed sections plus metadata.
//! Renderers walk the list in order and may not reorder or invent sections.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::assessment::{CategoryTag, RatingTier};

/// Discriminant of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Header,
    Summary,
    Metrics,
    Category,
    Cta,
    Footer,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Summary => "summary",
            SectionType::Metrics => "metrics",
            SectionType::Category => "category",
            SectionType::Cta => "cta",
            SectionType::Footer => "footer",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ordered, typed block of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl ReportSection {
    pub fn new(id: impl Into<String>, title: Option<String>, content: SectionContent) -> Self {
        Self {
            id: id.into(),
            title,
            content,
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.content.section_type()
    }
}

/// Type-specific section payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionContent {
    Header(HeaderContent),
    Summary(SummaryContent),
    Metrics(MetricsContent),
    Category(CategoryContent),
    Cta(CtaContent),
    Footer(FooterContent),
}

impl SectionContent {
    pub fn section_type(&self) -> SectionType {
        match self {
            SectionContent::Header(_) => SectionType::Header,
            SectionContent::Summary(_) => SectionType::Summary,
            SectionContent::Metrics(_) => SectionType::Metrics,
            SectionContent::Category(_) => SectionType::Category,
            SectionContent::Cta(_) => SectionType::Cta,
            SectionContent::Footer(_) => SectionType::Footer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderContent {
    pub title: String,
    pub subtitle: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared_for: Option<String>,
    pub generated_date: String,
}

/// Where the summary text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryVariant {
    /// Externally generated narrative. Untrusted text.
    Ai,
    /// Synthesized locally from the pain point and tech readiness answers.
    Personalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryContent {
    pub variant: SummaryVariant,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsContent {
    pub overall_score: u8,
    pub overall_rating: RatingTier,
    pub rating_description: String,
    pub total_time_savings: String,
    pub top_recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContent {
    pub category: CategoryTag,
    pub name: String,
    pub score: u8,
    pub rating: RatingTier,
    pub tools: Vec<String>,
    pub improvements: Vec<String>,
    pub time_savings: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    pub heading: String,
    pub body: String,
    pub button_label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    pub company_name: String,
    pub year: i32,
    pub disclaimer: String,
}

/// Who the report is for and the headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_readiness: Option<String>,
    pub generated_date: String,
    pub overall_score: u8,
    pub overall_rating: RatingTier,
    pub total_time_savings: String,
}

/// The canonical report: built fresh per render request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedReport {
    pub sections: Vec<ReportSection>,
    pub metadata: ReportMetadata,
}

/// A violation of the section ordering rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureViolation {
    Empty,
    HeaderNotFirst,
    FooterNotLast,
    /// A section type appears more often than allowed.
    TooMany { section: SectionType, found: usize, max: usize },
    MissingSummary,
    ScoreOutOfRange { section_id: String, score: u8 },
}

impl fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureViolation::Empty => write!(f, "report has no sections"),
            StructureViolation::HeaderNotFirst => write!(f, "first section must be the header"),
            StructureViolation::FooterNotLast => write!(f, "last section must be the footer"),
            StructureViolation::TooMany {
                section,
                found,
                max,
            } => write!(f, "found {} {} sections, at most {} allowed", found, section, max),
            StructureViolation::MissingSummary => write!(f, "report has no summary section"),
            StructureViolation::ScoreOutOfRange { section_id, score } => {
                write!(f, "section {} has score {} outside 0-100", section_id, score)
            }
        }
    }
}

impl FormattedReport {
    /// Number of sections of the given type.
    pub fn count(&self, section_type: SectionType) -> usize {
        self.sections
            .iter()
            .filter(|s| s.section_type() == section_type)
            .count()
    }

    /// Checks the ordering rules every renderer relies on.
    ///
    /// Exactly one header (first), exactly one footer (last), exactly one
    /// summary, at most one metrics and one CTA section, and scores in range.
    pub fn check_structure(&self) -> Result<(), StructureViolation> {
        let first = self.sections.first().ok_or(StructureViolation::Empty)?;
        if first.section_type() != SectionType::Header {
            return Err(StructureViolation::HeaderNotFirst);
        }
        let last = self.sections.last().ok_or(StructureViolation::Empty)?;
        if last.section_type() != SectionType::Footer {
            return Err(StructureViolation::FooterNotLast);
        }

        for (section, max) in [
            (SectionType::Header, 1),
            (SectionType::Footer, 1),
            (SectionType::Summary, 1),
            (SectionType::Metrics, 1),
            (SectionType::Cta, 1),
        ] {
            let found = self.count(section);
            if found > max {
                return Err(StructureViolation::TooMany {
                    section,
                    found,
                    max,
                });
            }
        }
        if self.count(SectionType::Summary) == 0 {
            return Err(StructureViolation::MissingSummary);
        }

        for section in &self.sections {
            let score = match &section.content {
                SectionContent::Metrics(m) => m.overall_score,
                SectionContent::Category(c) => c.score,
                _ => continue,
            };
            if score > 100 {
                return Err(StructureViolation::ScoreOutOfRange {
                    section_id: section.id.clone(),
                    score,
                });
            }
        }

        Ok(())
    }
}
