//! Answers collected by the wizard.

use serde::{Deserialize, Serialize};

use super::question_bank::{self, ids};
use super::CategoryTag;

/// A single answer to a wizard question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: String,
    pub category: CategoryTag,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        value: impl Into<String>,
        category: CategoryTag,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
            category,
        }
    }
}

/// Ordered answers keyed by question id.
///
/// Re-answering a question replaces the earlier answer in place, so each
/// question id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Answer>", into = "Vec<Answer>")]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier answer to the same question.
    pub fn record(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|existing| existing.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Answers tagged with `category`, in recording order.
    pub fn for_category(&self, category: CategoryTag) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(move |a| a.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl From<Vec<Answer>> for AnswerSet {
    fn from(answers: Vec<Answer>) -> Self {
        let mut set = AnswerSet::new();
        for answer in answers {
            set.record(answer);
        }
        set
    }
}

impl From<AnswerSet> for Vec<Answer> {
    fn from(set: AnswerSet) -> Self {
        set.answers
    }
}

/// Free-text context gathered from the general questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_readiness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_challenge: Option<String>,
}

impl AuditContext {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let value = |id: &str| {
            answers
                .get(id)
                .map(|a| a.value.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            pain_point: value(ids::PAIN_POINT),
            tech_readiness: value(ids::TECH_READINESS),
            business_type: value(ids::BUSINESS_TYPE),
            team_size: value(ids::TEAM_SIZE),
            key_challenge: value(ids::KEY_CHALLENGE),
        }
    }
}

/// Builds an answer for a known question, filling in its category.
pub fn answer_for(question_id: &str, value: impl Into<String>) -> Option<Answer> {
    question_bank::find(question_id).map(|q| Answer::new(q.id, value, q.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_answering_replaces_in_place() {
        let mut set = AnswerSet::new();
        set.record(Answer::new("a", "1", CategoryTag::Reporting));
        set.record(Answer::new("b", "2", CategoryTag::Reporting));
        set.record(Answer::new("a", "3", CategoryTag::Reporting));

        assert_eq!(set.len(), 2);
        let values: Vec<_> = set.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(values, vec!["3", "2"]);
    }

    #[test]
    fn deserializing_duplicates_keeps_last_answer() {
        let json = r#"[
            {"questionId":"x","value":"first","category":"scheduling"},
            {"questionId":"x","value":"second","category":"scheduling"}
        ]"#;
        let set: AnswerSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("x").unwrap().value, "second");
    }

    #[test]
    fn context_extracts_general_answers() {
        let mut set = AnswerSet::new();
        set.record(answer_for(ids::PAIN_POINT, "  Chasing invoices  ").unwrap());
        set.record(answer_for(ids::TECH_READINESS, "Open to new tools").unwrap());
        set.record(answer_for(ids::BUSINESS_TYPE, "   ").unwrap());

        let context = AuditContext::from_answers(&set);
        assert_eq!(context.pain_point.as_deref(), Some("Chasing invoices"));
        assert_eq!(context.tech_readiness.as_deref(), Some("Open to new tools"));
        assert!(context.business_type.is_none());
    }

    #[test]
    fn answer_for_unknown_question_is_none() {
        assert!(answer_for("not-a-question", "x").is_none());
    }
}
