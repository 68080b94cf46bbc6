//! Assessment results: per-category assessments and the aggregate audit report.

use serde::{Deserialize, Serialize};

use super::{CategoryTag, RatingTier};

/// Scored result for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssessment {
    pub category: CategoryTag,
    pub rating: RatingTier,
    pub score: u8,
    pub tools: Vec<String>,
    pub improvements: Vec<String>,
    /// Formatted as `"<N> hours/week"`.
    pub time_savings: String,
}

/// Aggregate audit report for one completed wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub categories: Vec<CategoryAssessment>,
    pub overall_rating: RatingTier,
    pub overall_score: u8,
    pub top_recommendations: Vec<String>,
    pub total_time_savings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated_summary: Option<String>,
}

impl AuditReport {
    /// The minimal report used when aggregation itself fails.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            overall_rating: RatingTier::Manual,
            overall_score: 0,
            top_recommendations: Vec::new(),
            total_time_savings: format_hours(0.0),
            ai_generated_summary: None,
        }
    }

    /// Returns a copy enriched with the narrative. Empty narratives are dropped.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        let summary = summary.into();
        self.ai_generated_summary = if summary.trim().is_empty() {
            None
        } else {
            Some(summary)
        };
        self
    }

    /// The AI narrative if present and non-blank.
    pub fn summary_text(&self) -> Option<&str> {
        self.ai_generated_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// Rounds to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats an hour count as `"<N> hours/week"`, dropping a trailing `.0`.
pub fn format_hours(hours: f64) -> String {
    let rounded = round_one_decimal(hours);
    if rounded.fract() == 0.0 {
        format!("{} hours/week", rounded as i64)
    } else {
        format!("{:.1} hours/week", rounded)
    }
}

/// Parses the numeric part of a `"<N> hours/week"` string.
pub fn parse_hours(formatted: &str) -> Option<f64> {
    formatted
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hours_drops_trailing_zero() {
        assert_eq!(format_hours(5.0), "5 hours/week");
        assert_eq!(format_hours(3.6), "3.6 hours/week");
        assert_eq!(format_hours(1.25), "1.3 hours/week");
        assert_eq!(format_hours(0.0), "0 hours/week");
    }

    #[test]
    fn parse_hours_reads_leading_number() {
        assert_eq!(parse_hours("3.6 hours/week"), Some(3.6));
        assert_eq!(parse_hours("12 hours/week"), Some(12.0));
        assert_eq!(parse_hours("lots"), None);
        assert_eq!(parse_hours(""), None);
    }

    #[test]
    fn blank_summary_is_not_attached() {
        let report = AuditReport::empty().with_summary("   ");
        assert!(report.ai_generated_summary.is_none());
        assert!(report.summary_text().is_none());

        let report = AuditReport::empty().with_summary("Great work");
        assert_eq!(report.summary_text(), Some("Great work"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let json = serde_json::to_value(AuditReport::empty()).unwrap();
        assert!(json.get("overallScore").is_some());
        assert!(json.get("totalTimeSavings").is_some());
        assert!(json.get("aiGeneratedSummary").is_none());
    }
}
