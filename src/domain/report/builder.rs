//! Report Model Builder - AuditReport to FormattedReport.
//!
//! Section order is fixed: header, summary, metrics, one section per
//! category in report order, CTA, footer. The wall clock is the only
//! non-deterministic input; `build_at` takes it explicitly.

use chrono::{DateTime, Datelike, Utc};

use super::personalization::personalized_summary;
use super::section::{
    CategoryContent, CtaContent, FooterContent, FormattedReport, HeaderContent, MetricsContent,
    ReportMetadata, ReportSection, SectionContent, SummaryContent, SummaryVariant,
};
use crate::domain::assessment::{AuditContext, AuditReport, CategoryAssessment};

pub const COMPANY_NAME: &str = "Automate Forward";
pub const REPORT_TITLE: &str = "Workflow Automation Audit";
pub const REPORT_SUBTITLE: &str = "Your personalised automation readiness report";
pub const BOOKING_URL: &str = "https://calendly.com/automate-forward/strategy-call";

pub const AI_DISCLAIMER: &str =
    "This summary was generated by AI from your answers. Review it with your team before acting on it.";
const CTA_HEADING: &str = "Ready to Reclaim Your Time?";
const CTA_BODY: &str = "Book a free 30-minute strategy call and we will walk through your results, prioritise the quick wins, and map out an automation plan that fits your team.";
const CTA_BUTTON: &str = "Book Your Free Strategy Call";
const FOOTER_DISCLAIMER: &str = "Time savings are estimates based on your self-assessment and typical results for businesses of your size. Actual results vary.";

/// Date format used in headers and metadata, e.g. "October 19, 2026".
const DATE_FORMAT: &str = "%B %-d, %Y";

/// Optional recipient details and context used to personalise a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub pain_point: Option<String>,
    pub tech_readiness: Option<String>,
}

impl ReportOptions {
    pub fn from_context(
        context: &AuditContext,
        user_email: Option<String>,
        user_name: Option<String>,
    ) -> Self {
        Self {
            user_email,
            user_name,
            pain_point: context.pain_point.clone(),
            tech_readiness: context.tech_readiness.clone(),
        }
    }
}

/// Builds the canonical report using the current time.
pub fn build(report: &AuditReport, options: &ReportOptions) -> FormattedReport {
    build_at(report, options, Utc::now())
}

/// Builds the canonical report as of `now`.
pub fn build_at(report: &AuditReport, options: &ReportOptions, now: DateTime<Utc>) -> FormattedReport {
    let generated_date = now.format(DATE_FORMAT).to_string();

    let mut sections = Vec::with_capacity(report.categories.len() + 5);
    sections.push(header_section(options, &generated_date));
    sections.push(summary_section(report, options));
    sections.push(metrics_section(report));
    sections.extend(report.categories.iter().map(category_section));
    sections.push(cta_section());
    sections.push(footer_section(now.year()));

    FormattedReport {
        sections,
        metadata: ReportMetadata {
            user_email: options.user_email.clone(),
            user_name: options.user_name.clone(),
            pain_point: options.pain_point.clone(),
            tech_readiness: options.tech_readiness.clone(),
            generated_date,
            overall_score: report.overall_score,
            overall_rating: report.overall_rating,
            total_time_savings: report.total_time_savings.clone(),
        },
    }
}

fn header_section(options: &ReportOptions, generated_date: &str) -> ReportSection {
    let prepared_for = options
        .user_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    ReportSection::new(
        "header",
        None,
        SectionContent::Header(HeaderContent {
            title: REPORT_TITLE.to_string(),
            subtitle: REPORT_SUBTITLE.to_string(),
            company_name: COMPANY_NAME.to_string(),
            prepared_for,
            generated_date: generated_date.to_string(),
        }),
    )
}

fn summary_section(report: &AuditReport, options: &ReportOptions) -> ReportSection {
    let content = match report.summary_text() {
        Some(narrative) => SummaryContent {
            variant: SummaryVariant::Ai,
            text: narrative.to_string(),
            disclaimer: Some(AI_DISCLAIMER.to_string()),
        },
        None => SummaryContent {
            variant: SummaryVariant::Personalized,
            text: personalized_summary(
                options.pain_point.as_deref(),
                options.tech_readiness.as_deref(),
            ),
            disclaimer: None,
        },
    };

    ReportSection::new(
        "summary",
        Some("Executive Summary".to_string()),
        SectionContent::Summary(content),
    )
}

fn metrics_section(report: &AuditReport) -> ReportSection {
    ReportSection::new(
        "metrics",
        Some("Your Automation Score".to_string()),
        SectionContent::Metrics(MetricsContent {
            overall_score: report.overall_score,
            overall_rating: report.overall_rating,
            rating_description: report.overall_rating.description().to_string(),
            total_time_savings: report.total_time_savings.clone(),
            top_recommendations: report.top_recommendations.clone(),
        }),
    )
}

fn category_section(assessment: &CategoryAssessment) -> ReportSection {
    let name = assessment.category.display_name();
    ReportSection::new(
        format!("category-{}", assessment.category.as_str()),
        Some(name.to_string()),
        SectionContent::Category(CategoryContent {
            category: assessment.category,
            name: name.to_string(),
            score: assessment.score,
            rating: assessment.rating,
            tools: assessment.tools.clone(),
            improvements: assessment.improvements.clone(),
            time_savings: assessment.time_savings.clone(),
        }),
    )
}

fn cta_section() -> ReportSection {
    ReportSection::new(
        "cta",
        Some(CTA_HEADING.to_string()),
        SectionContent::Cta(CtaContent {
            heading: CTA_HEADING.to_string(),
            body: CTA_BODY.to_string(),
            button_label: CTA_BUTTON.to_string(),
            url: BOOKING_URL.to_string(),
        }),
    )
}

fn footer_section(year: i32) -> ReportSection {
    ReportSection::new(
        "footer",
        None,
        SectionContent::Footer(FooterContent {
            company_name: COMPANY_NAME.to_string(),
            year,
            disclaimer: FOOTER_DISCLAIMER.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};
    use crate::domain::report::section::SectionType;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn types(report: &FormattedReport) -> Vec<SectionType> {
        report.sections.iter().map(|s| s.section_type()).collect()
    }

    #[test]
    fn sections_follow_fixed_order() {
        let report = build_at(&assess_all(&AnswerSet::new()), &ReportOptions::default(), fixed_now());

        let mut expected = vec![SectionType::Header, SectionType::Summary, SectionType::Metrics];
        expected.extend(std::iter::repeat(SectionType::Category).take(5));
        expected.extend([SectionType::Cta, SectionType::Footer]);
        assert_eq!(types(&report), expected);
        assert!(report.check_structure().is_ok());
    }

    #[test]
    fn category_sections_keep_report_order() {
        let audit = assess_all(&AnswerSet::new());
        let report = build_at(&audit, &ReportOptions::default(), fixed_now());

        let ids: Vec<&str> = report
            .sections
            .iter()
            .filter(|s| s.section_type() == SectionType::Category)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "category-task-management",
                "category-customer-communication",
                "category-data-entry",
                "category-scheduling",
                "category-reporting",
            ]
        );
    }

    #[test]
    fn ai_narrative_replaces_personalized_summary() {
        let audit = assess_all(&AnswerSet::new()).with_summary("Your business is ready.");
        let report = build_at(&audit, &ReportOptions::default(), fixed_now());

        let SectionContent::Summary(summary) = &report.sections[1].content else {
            panic!("second section is not the summary");
        };
        assert_eq!(summary.variant, SummaryVariant::Ai);
        assert_eq!(summary.text, "Your business is ready.");
        assert_eq!(summary.disclaimer.as_deref(), Some(AI_DISCLAIMER));
        assert_eq!(report.count(SectionType::Summary), 1);
    }

    #[test]
    fn blank_narrative_uses_personalized_summary() {
        let mut audit = assess_all(&AnswerSet::new());
        audit.ai_generated_summary = Some("   ".to_string());
        let options = ReportOptions {
            tech_readiness: Some("Hesitant but willing to try".to_string()),
            ..Default::default()
        };
        let report = build_at(&audit, &options, fixed_now());

        let SectionContent::Summary(summary) = &report.sections[1].content else {
            panic!("second section is not the summary");
        };
        assert_eq!(summary.variant, SummaryVariant::Personalized);
        assert!(summary.disclaimer.is_none());
    }

    #[test]
    fn metrics_carry_rating_description() {
        let audit = assess_all(&AnswerSet::new());
        let report = build_at(&audit, &ReportOptions::default(), fixed_now());

        let SectionContent::Metrics(metrics) = &report.sections[2].content else {
            panic!("third section is not metrics");
        };
        assert_eq!(metrics.rating_description, audit.overall_rating.description());
        assert_eq!(metrics.top_recommendations, audit.top_recommendations);
    }

    #[test]
    fn dates_come_from_the_supplied_clock() {
        let report = build_at(&AuditReport::empty(), &ReportOptions::default(), fixed_now());
        assert_eq!(report.metadata.generated_date, "October 19, 2026");

        let SectionContent::Footer(footer) = &report.sections.last().unwrap().content else {
            panic!("last section is not the footer");
        };
        assert_eq!(footer.year, 2026);
    }

    #[test]
    fn building_twice_yields_identical_sections() {
        let audit = assess_all(&AnswerSet::new()).with_summary("Same every time");
        let options = ReportOptions {
            user_email: Some("owner@example.com".to_string()),
            user_name: Some("Sam".to_string()),
            ..Default::default()
        };
        let first = build_at(&audit, &options, fixed_now());
        let second = build_at(&audit, &options, fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_report_still_builds_a_valid_structure() {
        let report = build_at(&AuditReport::empty(), &ReportOptions::default(), fixed_now());
        assert!(report.check_structure().is_ok());
        assert_eq!(report.count(SectionType::Category), 0);
    }

    #[test]
    fn user_name_becomes_prepared_for() {
        let options = ReportOptions {
            user_name: Some("  Jordan  ".to_string()),
            ..Default::default()
        };
        let report = build_at(&AuditReport::empty(), &options, fixed_now());
        let SectionContent::Header(header) = &report.sections[0].content else {
            panic!("first section is not the header");
        };
        assert_eq!(header.prepared_for.as_deref(), Some("Jordan"));
    }
}
