//! Narrative Module - Inputs and fallback text for the executive summary.
//!
//! The AI call itself lives behind the `AIProvider` port; this module only
//! shapes what is sent and what is shown when the call fails.

mod fallback;
mod prompt;
mod scores;

pub use fallback::fallback_narrative;
pub use prompt::{user_prompt, SYSTEM_PROMPT};
pub use scores::{format_score, CategoryScore, ScoreSummary};
