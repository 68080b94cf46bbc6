//! Score digest sent to the narrative generator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::assessment::{AuditReport, CategoryTag};

/// One category's score and level label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub level: String,
}

/// Overall figures plus per-category scores, keyed by category id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall: f64,
    pub total_time_savings: String,
    #[serde(default)]
    pub by_category: BTreeMap<String, CategoryScore>,
}

impl ScoreSummary {
    pub fn from_report(report: &AuditReport) -> Self {
        let by_category = report
            .categories
            .iter()
            .map(|c| {
                (
                    c.category.as_str().to_string(),
                    CategoryScore {
                        score: f64::from(c.score),
                        level: c.rating.label().to_string(),
                    },
                )
            })
            .collect();

        Self {
            overall: f64::from(report.overall_score),
            total_time_savings: report.total_time_savings.clone(),
            by_category,
        }
    }

    /// Categories in declaration order first, then any unrecognised keys.
    ///
    /// Yields the human-readable name and the score for each entry.
    pub fn named_categories(&self) -> Vec<(String, &CategoryScore)> {
        let mut known: Vec<(CategoryTag, &CategoryScore)> = Vec::new();
        let mut unknown: Vec<(String, &CategoryScore)> = Vec::new();

        for (key, score) in &self.by_category {
            match key.parse::<CategoryTag>() {
                Ok(tag) => known.push((tag, score)),
                Err(_) => unknown.push((key.clone(), score)),
            }
        }
        known.sort_by_key(|(tag, _)| *tag);

        known
            .into_iter()
            .map(|(tag, score)| (tag.display_name().to_string(), score))
            .chain(unknown)
            .collect()
    }
}

/// Formats a numeric score for prose, dropping fractional noise.
pub fn format_score(score: f64) -> String {
    format!("{:.0}", score.clamp(0.0, 100.0))
}
