//! Prompt text for the narrative generator.

use super::scores::{format_score, ScoreSummary};
use crate::domain::assessment::AuditContext;

pub const SYSTEM_PROMPT: &str = "You are a workflow automation consultant writing for small business owners. \
Write a warm, practical executive summary of their automation audit in two or three short paragraphs. \
Refer to their categories by name, highlight the biggest opportunity first, and keep the tone encouraging. \
Do not use markdown, headings, or bullet points.";

/// Builds the user message describing the scores and business context.
pub fn user_prompt(scores: &ScoreSummary, context: &AuditContext) -> String {
    let mut prompt = format!(
        "Overall automation score: {}/100\nEstimated time savings: {}\n\nCategory scores:\n",
        format_score(scores.overall),
        scores.total_time_savings
    );

    for (name, score) in scores.named_categories() {
        prompt.push_str(&format!(
            "- {}: {}/100 ({})\n",
            name,
            format_score(score.score),
            score.level
        ));
    }

    let context_lines = [
        ("Business type", &context.business_type),
        ("Team size", &context.team_size),
        ("Biggest pain point", &context.pain_point),
        ("Attitude to new technology", &context.tech_readiness),
        ("Key challenge", &context.key_challenge),
    ];
    let mut wrote_heading = false;
    for (label, value) in context_lines {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            if !wrote_heading {
                prompt.push_str("\nAbout the business:\n");
                wrote_heading = true;
            }
            prompt.push_str(&format!("- {}: {}\n", label, value.trim()));
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};

    #[test]
    fn prompt_lists_every_category() {
        let scores = ScoreSummary::from_report(&assess_all(&AnswerSet::new()));
        let prompt = user_prompt(&scores, &AuditContext::default());

        assert!(prompt.contains("Overall automation score: 0/100"));
        assert!(prompt.contains("- Data Entry: 0/100 (Manual)"));
        assert!(!prompt.contains("About the business"));
    }

    #[test]
    fn prompt_includes_context_when_present() {
        let scores = ScoreSummary::from_report(&assess_all(&AnswerSet::new()));
        let context = AuditContext {
            pain_point: Some("Chasing invoices".to_string()),
            team_size: Some("2-5 people".to_string()),
            ..Default::default()
        };
        let prompt = user_prompt(&scores, &context);

        assert!(prompt.contains("- Biggest pain point: Chasing invoices"));
        assert!(prompt.contains("- Team size: 2-5 people"));
        assert!(!prompt.contains("Key challenge"));
    }
}
