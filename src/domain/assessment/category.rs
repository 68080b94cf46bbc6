//! Category and rating-tier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ScoringError;

/// One of the six fixed workflow domains an assessment question belongs to.
///
/// Declaration order is significant: reports list categories in this order
/// and ties in the top-recommendation sort are broken by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryTag {
    TaskManagement,
    CustomerCommunication,
    DataEntry,
    Scheduling,
    Reporting,
    General,
}

impl CategoryTag {
    /// All categories in declaration order.
    pub const ALL: [CategoryTag; 6] = [
        CategoryTag::TaskManagement,
        CategoryTag::CustomerCommunication,
        CategoryTag::DataEntry,
        CategoryTag::Scheduling,
        CategoryTag::Reporting,
        CategoryTag::General,
    ];

    /// Categories that receive a score. `General` answers only feed narrative context.
    pub const SCORED: [CategoryTag; 5] = [
        CategoryTag::TaskManagement,
        CategoryTag::CustomerCommunication,
        CategoryTag::DataEntry,
        CategoryTag::Scheduling,
        CategoryTag::Reporting,
    ];

    /// Wire identifier (`task-management`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::TaskManagement => "task-management",
            CategoryTag::CustomerCommunication => "customer-communication",
            CategoryTag::DataEntry => "data-entry",
            CategoryTag::Scheduling => "scheduling",
            CategoryTag::Reporting => "reporting",
            CategoryTag::General => "general",
        }
    }

    /// Human-readable name used in every rendered output.
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryTag::TaskManagement => "Task Management",
            CategoryTag::CustomerCommunication => "Customer Communication",
            CategoryTag::DataEntry => "Data Entry",
            CategoryTag::Scheduling => "Scheduling",
            CategoryTag::Reporting => "Reporting",
            CategoryTag::General => "General",
        }
    }

    /// Weekly hours a fully manual team spends on this category.
    pub fn base_hours(&self) -> f64 {
        match self {
            CategoryTag::TaskManagement => 5.0,
            CategoryTag::CustomerCommunication => 6.0,
            CategoryTag::DataEntry => 4.0,
            CategoryTag::Scheduling => 3.0,
            CategoryTag::Reporting => 4.0,
            CategoryTag::General => 2.0,
        }
    }

    /// Returns true if answers in this category contribute to scoring.
    pub fn is_scored(&self) -> bool {
        !matches!(self, CategoryTag::General)
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s.trim())
            .ok_or_else(|| ScoringError::UnknownCategory(s.to_string()))
    }
}

/// Automation maturity label derived from a 0-100 score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingTier {
    #[default]
    Manual,
    #[serde(rename = "Partially Automated")]
    PartiallyAutomated,
    #[serde(rename = "Fully Automated")]
    FullyAutomated,
}

impl RatingTier {
    /// Lowest score that rates as partially automated.
    pub const PARTIAL_THRESHOLD: u8 = 40;
    /// Lowest score that rates as fully automated.
    pub const FULL_THRESHOLD: u8 = 75;

    /// Maps a score onto its tier using the fixed thresholds.
    pub fn from_score(score: u8) -> Self {
        if score >= Self::FULL_THRESHOLD {
            RatingTier::FullyAutomated
        } else if score >= Self::PARTIAL_THRESHOLD {
            RatingTier::PartiallyAutomated
        } else {
            RatingTier::Manual
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Manual => "Manual",
            RatingTier::PartiallyAutomated => "Partially Automated",
            RatingTier::FullyAutomated => "Fully Automated",
        }
    }

    /// Fixed one-sentence description shown next to the overall rating.
    pub fn description(&self) -> &'static str {
        match self {
            RatingTier::Manual => {
                "Most of your workflows still run by hand. There is significant room to reclaim time through automation."
            }
            RatingTier::PartiallyAutomated => {
                "You have automated some workflows, but gaps remain where manual work is slowing your team down."
            }
            RatingTier::FullyAutomated => {
                "Your workflows are largely automated. Focus on refining and connecting the systems you already have."
            }
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RatingTier {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Manual" => Ok(RatingTier::Manual),
            "Partially Automated" => Ok(RatingTier::PartiallyAutomated),
            "Fully Automated" => Ok(RatingTier::FullyAutomated),
            other => Err(ScoringError::UnknownRating(other.to_string())),
        }
    }
}
