//! Deterministic narrative used when the AI provider cannot answer.
//!
//! Always names every category with its score so the summary stays useful
//! without the model.

use super::scores::{format_score, ScoreSummary};
use crate::domain::assessment::{AuditContext, RatingTier};

pub fn fallback_narrative(scores: &ScoreSummary, context: &AuditContext) -> String {
    let overall = scores.overall.clamp(0.0, 100.0).round() as u8;
    let tier = RatingTier::from_score(overall);

    let mut text = format!(
        "Your business scored {}/100 overall, which places you in the {} tier. {}",
        format_score(scores.overall),
        tier.label(),
        tier.description()
    );

    let categories = scores.named_categories();
    if !categories.is_empty() {
        let listed: Vec<String> = categories
            .iter()
            .map(|(name, score)| format!("{} {}/100 ({})", name, format_score(score.score), score.level))
            .collect();
        text.push_str(&format!("\n\nBy category: {}.", listed.join(", ")));

        let weakest = categories
            .iter()
            .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
            .map(|(name, _)| name.as_str());
        if let Some(weakest) = weakest {
            text.push_str(&format!(
                " {} is your biggest opportunity and the best place to start.",
                weakest
            ));
        }
    }

    if let Some(pain) = context.pain_point.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        text.push_str(&format!(
            "\n\nYou mentioned \"{}\" as a key frustration. The recommendations in this report are a practical first step toward fixing it.",
            pain
        ));
    }

    text.push_str(&format!(
        "\n\nAutomating the gaps identified here could save your team an estimated {}.",
        scores.total_time_savings
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};

    #[test]
    fn fallback_names_every_category_and_score() {
        let scores = ScoreSummary::from_report(&assess_all(&AnswerSet::new()));
        let text = fallback_narrative(&scores, &AuditContext::default());

        for name in ["Task Management", "Customer Communication", "Data Entry", "Scheduling", "Reporting"] {
            assert!(text.contains(&format!("{} 0/100", name)), "missing {}", name);
        }
        assert!(text.contains("0/100 overall"));
        assert!(text.contains("Manual tier"));
    }

    #[test]
    fn fallback_is_deterministic() {
        let scores = ScoreSummary::from_report(&assess_all(&AnswerSet::new()));
        let context = AuditContext {
            pain_point: Some("Data entry".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fallback_narrative(&scores, &context),
            fallback_narrative(&scores, &context)
        );
    }

    #[test]
    fn fallback_mentions_pain_point() {
        let scores = ScoreSummary::from_report(&assess_all(&AnswerSet::new()));
        let context = AuditContext {
            pain_point: Some("Manual invoicing".to_string()),
            ..Default::default()
        };
        assert!(fallback_narrative(&scores, &context).contains("\"Manual invoicing\""));
    }
}
