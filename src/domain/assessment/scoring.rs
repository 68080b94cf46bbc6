//! Scoring engine: raw answers to category assessments and an audit report.
//!
//! Scoring fails open. A category whose answers cannot be parsed falls back
//! to the zero-score default, and a failed aggregation yields the empty
//! report, so a broken scoring step never blocks report display.

use super::answer::{Answer, AnswerSet};
use super::question_bank::{self, QuestionKind, POINTS_PER_STEP};
use super::recommendations;
use super::report::{format_hours, parse_hours, round_one_decimal, AuditReport, CategoryAssessment};
use super::{CategoryTag, RatingTier, ScoringError};

/// Share of baseline hours that automation can remove at a perfect score.
const MAX_AUTOMATION_SHARE: f64 = 0.7;

/// Maximum number of top recommendations in a report.
pub const TOP_RECOMMENDATION_COUNT: usize = 3;

/// Overall figures derived from the category assessments.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub overall_score: u8,
    pub overall_rating: RatingTier,
    pub total_time_savings: String,
    pub top_recommendations: Vec<String>,
}

/// Score contributed by one answer, or `None` when the answer is not scored.
///
/// Text answers, answers to unknown questions, and answers to general
/// questions contribute nothing. A multiple-choice value that is not one of
/// the question's options is an error.
pub fn answer_score(answer: &Answer) -> Result<Option<u8>, ScoringError> {
    let Some(question) = question_bank::find(&answer.question_id) else {
        tracing::debug!(question_id = %answer.question_id, "ignoring answer to unknown question");
        return Ok(None);
    };

    if !question.is_scored() {
        return Ok(None);
    }

    match question.kind {
        QuestionKind::Text => Ok(None),
        QuestionKind::MultipleChoice(_) => {
            let index = question
                .option_index(&answer.value)
                .ok_or_else(|| ScoringError::UnknownOption {
                    question_id: answer.question_id.clone(),
                    value: answer.value.clone(),
                })?;
            Ok(Some(index as u8 * POINTS_PER_STEP))
        }
    }
}

/// Mean of `values`, rounded half-up, clamped to 0..=100. Empty input is 0.
fn rounded_mean(values: &[u32]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u32 = values.iter().sum();
    let n = values.len() as u32;
    let mean = (2 * sum + n) / (2 * n);
    mean.min(100) as u8
}

/// Weekly hours still recoverable for a category at `score`.
///
/// Fully automated categories keep 30% of the baseline rather than dropping to zero.
pub fn hours_saved(category: CategoryTag, score: u8) -> f64 {
    let score = f64::from(score.min(100));
    round_one_decimal(category.base_hours() * (1.0 - (score / 100.0) * MAX_AUTOMATION_SHARE))
}

/// Builds an assessment for `category` from an already computed score.
pub fn assessment_for_score(category: CategoryTag, score: u8) -> CategoryAssessment {
    let score = score.min(100);
    let rating = RatingTier::from_score(score);
    let recommendation = recommendations::lookup(category, rating);

    CategoryAssessment {
        category,
        rating,
        score,
        tools: recommendation.tools_owned(),
        improvements: recommendation.improvements_owned(),
        time_savings: format_hours(hours_saved(category, score)),
    }
}

/// Zero-score, manual-tier assessment used when a category cannot be scored.
pub fn default_assessment(category: CategoryTag) -> CategoryAssessment {
    assessment_for_score(category, 0)
}

/// Scores one category, surfacing parse failures.
///
/// An answer counts only toward the category its question belongs to; a
/// client-supplied tag naming another category is ignored.
pub fn try_assess(answers: &AnswerSet, category: CategoryTag) -> Result<CategoryAssessment, ScoringError> {
    let mut scores = Vec::new();
    for answer in answers.for_category(category) {
        if let Some(question) = question_bank::find(&answer.question_id) {
            if question.category != category {
                tracing::debug!(
                    question_id = %answer.question_id,
                    tagged = %category,
                    actual = %question.category,
                    "ignoring answer tagged with another category"
                );
                continue;
            }
        }
        if let Some(score) = answer_score(answer)? {
            scores.push(u32::from(score));
        }
    }

    Ok(assessment_for_score(category, rounded_mean(&scores)))
}

/// Scores one category. Never fails: parse errors yield the default assessment.
pub fn assess(answers: &AnswerSet, category: CategoryTag) -> CategoryAssessment {
    try_assess(answers, category).unwrap_or_else(|err| {
        tracing::warn!(%category, error = %err, "category scoring failed, using default assessment");
        default_assessment(category)
    })
}

/// Aggregates category assessments into overall figures.
pub fn aggregate(assessments: &[CategoryAssessment]) -> Result<Aggregate, ScoringError> {
    if assessments.is_empty() {
        return Err(ScoringError::NoCategories);
    }

    // Category scores are already rounded; the mean is rounded again.
    let category_scores: Vec<u32> = assessments.iter().map(|a| u32::from(a.score)).collect();
    let overall_score = rounded_mean(&category_scores);

    let mut total_hours = 0.0;
    for assessment in assessments {
        total_hours += parse_hours(&assessment.time_savings).ok_or_else(|| {
            ScoringError::InvalidTimeSavings {
                category: assessment.category,
                value: assessment.time_savings.clone(),
            }
        })?;
    }

    // `sort_by_key` is stable, so equal scores keep declaration order.
    let mut by_score: Vec<&CategoryAssessment> = assessments.iter().collect();
    by_score.sort_by_key(|a| a.score);
    let top_recommendations = by_score
        .into_iter()
        .take(TOP_RECOMMENDATION_COUNT)
        .filter_map(|a| a.improvements.first().cloned())
        .collect();

    Ok(Aggregate {
        overall_score,
        overall_rating: RatingTier::from_score(overall_score),
        total_time_savings: format_hours(total_hours),
        top_recommendations,
    })
}

/// Scores every scored category and assembles the audit report.
pub fn assess_all(answers: &AnswerSet) -> AuditReport {
    let categories: Vec<CategoryAssessment> = CategoryTag::SCORED
        .iter()
        .map(|category| assess(answers, *category))
        .collect();

    match aggregate(&categories) {
        Ok(aggregate) => AuditReport {
            categories,
            overall_rating: aggregate.overall_rating,
            overall_score: aggregate.overall_score,
            top_recommendations: aggregate.top_recommendations,
            total_time_savings: aggregate.total_time_savings,
            ai_generated_summary: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "report aggregation failed, using empty report");
            AuditReport::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::question_bank::{for_category, OPTIONS_PER_QUESTION};
    use proptest::prelude::*;

    fn option_at(question_id: &str, index: usize) -> String {
        match question_bank::find(question_id).unwrap().kind {
            QuestionKind::MultipleChoice(options) => options[index].to_string(),
            QuestionKind::Text => panic!("{} is a text question", question_id),
        }
    }

    /// Answers every scored question in `category` with option `index`.
    fn answer_category(set: &mut AnswerSet, category: CategoryTag, index: usize) {
        for question in for_category(category).filter(|q| q.is_scored()) {
            set.record(Answer::new(question.id, option_at(question.id, index), category));
        }
    }

    fn scenario_answers() -> AnswerSet {
        let mut set = AnswerSet::new();
        answer_category(&mut set, CategoryTag::TaskManagement, 0);
        answer_category(&mut set, CategoryTag::CustomerCommunication, 1);
        answer_category(&mut set, CategoryTag::DataEntry, 4);
        answer_category(&mut set, CategoryTag::Scheduling, 3);
        answer_category(&mut set, CategoryTag::Reporting, 2);
        set
    }

    #[test]
    fn option_index_times_25_is_the_answer_score() {
        for index in 0..OPTIONS_PER_QUESTION {
            let answer = Answer::new(
                "task-handoffs",
                option_at("task-handoffs", index),
                CategoryTag::TaskManagement,
            );
            assert_eq!(answer_score(&answer).unwrap(), Some(index as u8 * 25));
        }
    }

    #[test]
    fn text_and_general_answers_are_not_scored() {
        let text = Answer::new("pain-point", "Invoices", CategoryTag::General);
        assert_eq!(answer_score(&text).unwrap(), None);

        let general_choice = Answer::new("tech-readiness", "Neutral", CategoryTag::General);
        assert_eq!(answer_score(&general_choice).unwrap(), None);
    }

    #[test]
    fn unknown_option_is_an_error() {
        let answer = Answer::new("task-handoffs", "Carrier pigeon", CategoryTag::TaskManagement);
        assert!(matches!(
            answer_score(&answer),
            Err(ScoringError::UnknownOption { .. })
        ));
    }

    #[test]
    fn category_score_is_rounded_mean() {
        let mut set = AnswerSet::new();
        set.record(Answer::new("sched-booking", option_at("sched-booking", 1), CategoryTag::Scheduling));
        set.record(Answer::new("sched-reminders", option_at("sched-reminders", 2), CategoryTag::Scheduling));

        // (25 + 50) / 2 = 37.5 rounds half-up to 38
        let assessment = assess(&set, CategoryTag::Scheduling);
        assert_eq!(assessment.score, 38);
        assert_eq!(assessment.rating, RatingTier::Manual);
    }

    #[test]
    fn answers_tagged_with_another_category_are_ignored() {
        let mut set = AnswerSet::new();
        set.record(Answer::new(
            "task-tracking",
            option_at("task-tracking", 4),
            CategoryTag::Reporting,
        ));

        assert_eq!(assess(&set, CategoryTag::Reporting).score, 0);
        assert_eq!(assess(&set, CategoryTag::TaskManagement).score, 0);

        set.record(Answer::new(
            "report-build",
            option_at("report-build", 2),
            CategoryTag::Reporting,
        ));
        assert_eq!(assess(&set, CategoryTag::Reporting).score, 50);
    }

    #[test]
    fn category_with_no_answers_defaults_to_manual_zero() {
        let assessment = assess(&AnswerSet::new(), CategoryTag::Reporting);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.rating, RatingTier::Manual);
        assert_eq!(
            assessment.tools,
            recommendations::lookup(CategoryTag::Reporting, RatingTier::Manual).tools_owned()
        );
    }

    #[test]
    fn unparseable_category_falls_back_to_default() {
        let mut set = AnswerSet::new();
        answer_category(&mut set, CategoryTag::DataEntry, 4);
        set.record(Answer::new("data-forms", "Telepathy", CategoryTag::DataEntry));

        assert!(try_assess(&set, CategoryTag::DataEntry).is_err());
        assert_eq!(assess(&set, CategoryTag::DataEntry), default_assessment(CategoryTag::DataEntry));
    }

    #[test]
    fn hours_saved_keeps_thirty_percent_at_full_score() {
        assert_eq!(hours_saved(CategoryTag::TaskManagement, 0), 5.0);
        assert_eq!(hours_saved(CategoryTag::TaskManagement, 100), 1.5);
        assert!(hours_saved(CategoryTag::Scheduling, 100) > 0.0);
    }

    #[test]
    fn scenario_scores_aggregate_to_fifty() {
        let report = assess_all(&scenario_answers());

        let scores: Vec<u8> = report.categories.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![0, 25, 100, 75, 50]);
        assert_eq!(report.overall_score, 50);
        assert_eq!(report.overall_rating, RatingTier::PartiallyAutomated);

        let expected: Vec<String> = [
            (CategoryTag::TaskManagement, RatingTier::Manual),
            (CategoryTag::CustomerCommunication, RatingTier::Manual),
            (CategoryTag::Reporting, RatingTier::PartiallyAutomated),
        ]
        .iter()
        .map(|(c, t)| recommendations::lookup(*c, *t).improvements[0].to_string())
        .collect();
        assert_eq!(report.top_recommendations, expected);
    }

    #[test]
    fn empty_answers_produce_all_manual_report() {
        let report = assess_all(&AnswerSet::new());
        assert_eq!(report.categories.len(), 5);
        assert!(report.categories.iter().all(|c| c.score == 0 && c.rating == RatingTier::Manual));
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.overall_rating, RatingTier::Manual);
        // 5 + 6 + 4 + 3 + 4
        assert_eq!(report.total_time_savings, "22 hours/week");
    }

    #[test]
    fn ties_keep_declaration_order() {
        let categories: Vec<_> = CategoryTag::SCORED
            .iter()
            .map(|c| assessment_for_score(*c, 50))
            .collect();
        let aggregate = aggregate(&categories).unwrap();
        let expected: Vec<String> = categories[..3]
            .iter()
            .map(|c| c.improvements[0].clone())
            .collect();
        assert_eq!(aggregate.top_recommendations, expected);
    }

    #[test]
    fn top_recommendations_shrink_with_fewer_categories() {
        let categories = vec![
            assessment_for_score(CategoryTag::Reporting, 80),
            assessment_for_score(CategoryTag::Scheduling, 10),
        ];
        let aggregate = aggregate(&categories).unwrap();
        assert_eq!(aggregate.top_recommendations.len(), 2);
        assert_eq!(aggregate.top_recommendations[0], categories[1].improvements[0]);
    }

    #[test]
    fn overall_score_rounds_mean_of_rounded_scores() {
        // 38 and 63 were each rounded already; their mean 50.5 rounds to 51.
        let categories = vec![
            assessment_for_score(CategoryTag::Scheduling, 38),
            assessment_for_score(CategoryTag::Reporting, 63),
        ];
        assert_eq!(aggregate(&categories).unwrap().overall_score, 51);
    }

    #[test]
    fn aggregate_rejects_malformed_time_savings() {
        let mut broken = assessment_for_score(CategoryTag::Reporting, 50);
        broken.time_savings = "soon".to_string();
        assert!(matches!(
            aggregate(&[broken]),
            Err(ScoringError::InvalidTimeSavings { .. })
        ));
    }

    #[test]
    fn aggregate_of_nothing_is_an_error() {
        assert!(matches!(aggregate(&[]), Err(ScoringError::NoCategories)));
    }

    proptest! {
        #[test]
        fn category_scores_stay_in_range(indices in proptest::collection::vec(0usize..OPTIONS_PER_QUESTION, 3)) {
            let mut set = AnswerSet::new();
            let questions: Vec<_> = for_category(CategoryTag::TaskManagement)
                .filter(|q| q.is_scored())
                .collect();
            for (question, index) in questions.iter().zip(indices.iter()) {
                set.record(Answer::new(question.id, option_at(question.id, *index), CategoryTag::TaskManagement));
            }

            let assessment = assess(&set, CategoryTag::TaskManagement);
            prop_assert!(assessment.score <= 100);
            prop_assert_eq!(assessment.rating, RatingTier::from_score(assessment.score));
        }

        #[test]
        fn rating_is_a_function_of_score(score in 0u8..=100) {
            let first = assessment_for_score(CategoryTag::DataEntry, score);
            let second = assessment_for_score(CategoryTag::DataEntry, score);
            prop_assert_eq!(first.rating, second.rating);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn top_recommendations_never_exceed_three(scores in proptest::collection::vec(0u8..=100, 0..6)) {
            let categories: Vec<_> = scores
                .iter()
                .zip(CategoryTag::ALL.iter())
                .map(|(s, c)| assessment_for_score(*c, *s))
                .collect();
            if let Ok(aggregate) = aggregate(&categories) {
                prop_assert_eq!(aggregate.top_recommendations.len(), categories.len().min(3));
            }
        }
    }
}
