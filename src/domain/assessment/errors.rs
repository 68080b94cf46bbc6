//! Assessment-specific error types.

use thiserror::Error;

use super::CategoryTag;

/// Errors raised while parsing answers or aggregating scores.
///
/// The public scoring entry points never return these; they log and fall
/// back to default assessments. The `try_*` variants surface them for tests
/// and callers that want to know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown rating tier: {0}")]
    UnknownRating(String),

    #[error("answer '{value}' is not an option of question {question_id}")]
    UnknownOption { question_id: String, value: String },

    #[error("no category assessments to aggregate")]
    NoCategories,

    #[error("malformed time savings for {category}: {value}")]
    InvalidTimeSavings { category: CategoryTag, value: String },
}
