//! Static question bank for the self-assessment wizard.
//!
//! Multiple-choice options are authored from least to most automated. The
//! zero-based option index is the only scoring signal; option text is never parsed.

use super::CategoryTag;

/// Number of options every multiple-choice question carries.
pub const OPTIONS_PER_QUESTION: usize = 5;

/// Points awarded per option step (index 0 → 0, index 4 → 100).
pub const POINTS_PER_STEP: u8 = 25;

/// Well-known ids of the general-context questions.
pub mod ids {
    pub const BUSINESS_TYPE: &str = "business-type";
    pub const TEAM_SIZE: &str = "team-size";
    pub const PAIN_POINT: &str = "pain-point";
    pub const TECH_READINESS: &str = "tech-readiness";
    pub const KEY_CHALLENGE: &str = "key-challenge";
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Fixed options ordered from least to most automated.
    MultipleChoice(&'static [&'static str; OPTIONS_PER_QUESTION]),
    /// Free-form text. Never scored.
    Text,
}

/// A single wizard question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub category: CategoryTag,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

impl Question {
    /// Zero-based index of `value` among this question's options.
    ///
    /// Returns `None` for text questions and for values that are not one of the options.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        match self.kind {
            QuestionKind::MultipleChoice(options) => {
                options.iter().position(|option| *option == value)
            }
            QuestionKind::Text => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice(_)) && self.category.is_scored()
    }
}

const FREQUENCY: [&str; OPTIONS_PER_QUESTION] = [
    "Entirely by hand",
    "Mostly by hand with a few shortcuts",
    "About half manual, half automated",
    "Mostly automated with occasional manual steps",
    "Fully automated end to end",
];

static QUESTIONS: &[Question] = &[
    // Task management
    Question {
        id: "task-tracking",
        category: CategoryTag::TaskManagement,
        prompt: "How does your team track tasks and assignments?",
        kind: QuestionKind::MultipleChoice(&[
            "Memory, sticky notes, or verbal reminders",
            "Shared spreadsheets or email threads",
            "A basic to-do or list app",
            "A project management tool used by most of the team",
            "A project management tool with automated assignment and status updates",
        ]),
    },
    Question {
        id: "task-handoffs",
        category: CategoryTag::TaskManagement,
        prompt: "How are handoffs between team members handled?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    Question {
        id: "task-recurring",
        category: CategoryTag::TaskManagement,
        prompt: "How are recurring tasks created each week or month?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    // Customer communication
    Question {
        id: "comm-followups",
        category: CategoryTag::CustomerCommunication,
        prompt: "How do you send follow-ups after a customer inquiry?",
        kind: QuestionKind::MultipleChoice(&[
            "We often forget to follow up",
            "Someone writes each follow-up manually",
            "We reuse saved templates but send them by hand",
            "Most follow-ups are triggered automatically",
            "Follow-ups are fully automated and personalised from our CRM",
        ]),
    },
    Question {
        id: "comm-faq",
        category: CategoryTag::CustomerCommunication,
        prompt: "How are common customer questions answered?",
        kind: QuestionKind::MultipleChoice(&[
            "Individually, every time",
            "Copy-pasted from a document",
            "A public FAQ page we point people to",
            "A help centre with canned responses in our inbox",
            "A chatbot or automated responder resolves most questions",
        ]),
    },
    Question {
        id: "comm-updates",
        category: CategoryTag::CustomerCommunication,
        prompt: "How do customers receive status updates on their orders or projects?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    // Data entry
    Question {
        id: "data-transfer",
        category: CategoryTag::DataEntry,
        prompt: "How does information move between your business systems?",
        kind: QuestionKind::MultipleChoice(&[
            "Retyped by hand into each system",
            "Exported and imported with spreadsheets",
            "Some systems sync, others are retyped",
            "Most systems are connected with integrations",
            "All systems share data automatically in real time",
        ]),
    },
    Question {
        id: "data-forms",
        category: CategoryTag::DataEntry,
        prompt: "How are form submissions and paperwork captured?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    Question {
        id: "data-invoices",
        category: CategoryTag::DataEntry,
        prompt: "How are invoices and receipts recorded?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    // Scheduling
    Question {
        id: "sched-booking",
        category: CategoryTag::Scheduling,
        prompt: "How do clients book appointments or meetings with you?",
        kind: QuestionKind::MultipleChoice(&[
            "Phone calls and back-and-forth emails",
            "We send available times by hand",
            "A shared calendar link for some bookings",
            "An online booking page for most bookings",
            "Self-service booking synced with every team calendar",
        ]),
    },
    Question {
        id: "sched-reminders",
        category: CategoryTag::Scheduling,
        prompt: "How are appointment reminders sent?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    // Reporting
    Question {
        id: "report-build",
        category: CategoryTag::Reporting,
        prompt: "How are your business reports put together?",
        kind: QuestionKind::MultipleChoice(&[
            "We rarely produce reports",
            "Compiled by hand from several sources",
            "Spreadsheet templates we update by hand",
            "Dashboards that refresh with some manual input",
            "Live dashboards and scheduled reports that need no manual work",
        ]),
    },
    Question {
        id: "report-kpis",
        category: CategoryTag::Reporting,
        prompt: "How do you monitor key performance numbers?",
        kind: QuestionKind::MultipleChoice(&FREQUENCY),
    },
    // General context
    Question {
        id: ids::BUSINESS_TYPE,
        category: CategoryTag::General,
        prompt: "What type of business do you run?",
        kind: QuestionKind::Text,
    },
    Question {
        id: ids::TEAM_SIZE,
        category: CategoryTag::General,
        prompt: "How many people are on your team?",
        kind: QuestionKind::MultipleChoice(&[
            "Just me",
            "2-5 people",
            "6-15 people",
            "16-50 people",
            "More than 50 people",
        ]),
    },
    Question {
        id: ids::PAIN_POINT,
        category: CategoryTag::General,
        prompt: "What is the most frustrating manual process in your business?",
        kind: QuestionKind::Text,
    },
    Question {
        id: ids::TECH_READINESS,
        category: CategoryTag::General,
        prompt: "How does your team feel about adopting new tools?",
        kind: QuestionKind::MultipleChoice(&[
            "Resistant to change",
            "Hesitant but willing to try",
            "Neutral",
            "Open to new tools",
            "Eager to adopt new technology",
        ]),
    },
    Question {
        id: ids::KEY_CHALLENGE,
        category: CategoryTag::General,
        prompt: "What would you most like automation to solve in the next six months?",
        kind: QuestionKind::Text,
    },
];

/// Every question in wizard order.
pub fn questions() -> &'static [Question] {
    QUESTIONS
}

/// Looks up a question by id.
pub fn find(question_id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|question| question.id == question_id)
}

/// Questions belonging to one category, in wizard order.
pub fn for_category(category: CategoryTag) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |question| question.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn question_ids_are_unique() {
        let mut seen = HashSet::new();
        for question in questions() {
            assert!(seen.insert(question.id), "duplicate id {}", question.id);
        }
    }

    #[test]
    fn every_scored_category_has_at_least_two_multiple_choice_questions() {
        for category in CategoryTag::SCORED {
            let count = for_category(category).filter(|q| q.is_scored()).count();
            assert!(count >= 2, "{} has {} scored questions", category, count);
        }
    }

    #[test]
    fn general_questions_are_never_scored() {
        assert!(for_category(CategoryTag::General).all(|q| !q.is_scored()));
    }

    #[test]
    fn option_index_uses_position_only() {
        let question = find("task-handoffs").unwrap();
        assert_eq!(question.option_index("Entirely by hand"), Some(0));
        assert_eq!(question.option_index("Fully automated end to end"), Some(4));
        assert_eq!(question.option_index("fully automated end to end"), None);
    }

    #[test]
    fn text_questions_have_no_option_index() {
        let question = find(ids::PAIN_POINT).unwrap();
        assert_eq!(question.kind, QuestionKind::Text);
        assert_eq!(question.option_index("anything"), None);
    }
}
