//! Assessment Module - Scoring the self-assessment wizard.
//!
//! # Components
//!
//! - `question_bank` - The fixed wizard questions and their option order
//! - `AnswerSet` / `AuditContext` - Collected answers and free-text context
//! - `recommendations` - Static (category, tier) recommendation table
//! - `scoring` - Answers to category assessments and the aggregate report
//!
//! Everything here is pure. Scoring fails open: a broken category yields
//! its zero-score default and a broken aggregation yields the empty report.

mod answer;
mod category;
mod errors;
pub mod question_bank;
pub mod recommendations;
mod report;
pub mod scoring;

pub use answer::{answer_for, Answer, AnswerSet, AuditContext};
pub use category::{CategoryTag, RatingTier};
pub use errors::ScoringError;
pub use question_bank::{Question, QuestionKind};
pub use recommendations::Recommendation;
pub use report::{format_hours, parse_hours, round_one_decimal, AuditReport, CategoryAssessment};
pub use scoring::{aggregate, assess, assess_all, Aggregate};
