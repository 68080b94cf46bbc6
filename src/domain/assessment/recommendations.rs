//! Static recommendation table keyed by (category, rating tier).
//!
//! Every combination carries at least one tool and one improvement; the
//! completeness test below guards that.

use super::{CategoryTag, RatingTier};

/// Tool suggestions and improvement steps for one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub tools: &'static [&'static str],
    pub improvements: &'static [&'static str],
}

impl Recommendation {
    pub fn tools_owned(&self) -> Vec<String> {
        self.tools.iter().map(|s| s.to_string()).collect()
    }

    pub fn improvements_owned(&self) -> Vec<String> {
        self.improvements.iter().map(|s| s.to_string()).collect()
    }
}

/// Looks up the recommendation for a category at a given tier.
pub fn lookup(category: CategoryTag, tier: RatingTier) -> Recommendation {
    use CategoryTag::*;
    use RatingTier::*;

    match (category, tier) {
        (TaskManagement, Manual) => Recommendation {
            tools: &["Trello", "Asana", "Todoist"],
            improvements: &[
                "Move task tracking out of email and into a shared task board",
                "Create templates for the tasks you repeat every week",
                "Give every task a single owner and a due date",
            ],
        },
        (TaskManagement, PartiallyAutomated) => Recommendation {
            tools: &["Asana Rules", "ClickUp Automations", "Zapier"],
            improvements: &[
                "Automate task creation from form submissions and emails",
                "Set up automatic status updates when work changes hands",
                "Schedule recurring tasks instead of recreating them",
            ],
        },
        (TaskManagement, FullyAutomated) => Recommendation {
            tools: &["Monday.com", "Make", "Notion Automations"],
            improvements: &[
                "Review automation logs monthly to catch silent failures",
                "Add workload dashboards to balance assignments",
            ],
        },
        (CustomerCommunication, Manual) => Recommendation {
            tools: &["Gmail Templates", "HubSpot Free CRM", "Mailchimp"],
            improvements: &[
                "Save your five most common replies as reusable templates",
                "Log every customer conversation in a single CRM",
                "Set up an automatic acknowledgement for new inquiries",
            ],
        },
        (CustomerCommunication, PartiallyAutomated) => Recommendation {
            tools: &["HubSpot Sequences", "Intercom", "ActiveCampaign"],
            improvements: &[
                "Trigger follow-up sequences automatically from your CRM",
                "Add a help centre so customers can answer common questions themselves",
                "Send order and project status updates without manual effort",
            ],
        },
        (CustomerCommunication, FullyAutomated) => Recommendation {
            tools: &["Intercom Fin", "Zendesk AI", "Customer.io"],
            improvements: &[
                "Personalise automated messages using customer history",
                "Measure response quality, not just response time",
            ],
        },
        (DataEntry, Manual) => Recommendation {
            tools: &["Google Forms", "Jotform", "Airtable"],
            improvements: &[
                "Replace paper and emailed forms with online forms that store data directly",
                "Identify the data you retype most often and connect those two systems first",
                "Standardise field names across your spreadsheets",
            ],
        },
        (DataEntry, PartiallyAutomated) => Recommendation {
            tools: &["Zapier", "Make", "Dext"],
            improvements: &[
                "Connect the remaining systems that still need manual exports",
                "Use receipt and invoice capture to remove bookkeeping entry",
                "Add validation rules so bad data is caught at the source",
            ],
        },
        (DataEntry, FullyAutomated) => Recommendation {
            tools: &["Workato", "n8n", "Fivetran"],
            improvements: &[
                "Monitor integrations for sync errors with automated alerts",
                "Document your data flows so new staff understand them",
            ],
        },
        (Scheduling, Manual) => Recommendation {
            tools: &["Calendly", "Google Calendar Appointment Schedules", "Acuity"],
            improvements: &[
                "Publish an online booking link instead of emailing available times",
                "Keep every team member's availability in one shared calendar",
            ],
        },
        (Scheduling, PartiallyAutomated) => Recommendation {
            tools: &["Calendly Workflows", "SavvyCal", "SimplyBook.me"],
            improvements: &[
                "Send automatic reminders by email and text to reduce no-shows",
                "Route bookings to the right team member automatically",
            ],
        },
        (Scheduling, FullyAutomated) => Recommendation {
            tools: &["Reclaim.ai", "Motion", "Chili Piper"],
            improvements: &[
                "Use booking data to forecast capacity and staffing",
                "Automate rescheduling and waitlist fills for cancellations",
            ],
        },
        (Reporting, Manual) => Recommendation {
            tools: &["Google Sheets", "Looker Studio", "Excel Power Query"],
            improvements: &[
                "Pick three numbers that matter and track them in one place every week",
                "Build a single reporting spreadsheet fed by exports instead of copy-paste",
            ],
        },
        (Reporting, PartiallyAutomated) => Recommendation {
            tools: &["Looker Studio", "Databox", "Power BI"],
            improvements: &[
                "Connect dashboards directly to your source systems",
                "Schedule reports to arrive in your inbox automatically",
            ],
        },
        (Reporting, FullyAutomated) => Recommendation {
            tools: &["Power BI", "Tableau", "Metabase"],
            improvements: &[
                "Add alerts that fire when a key metric moves outside its normal range",
                "Share live dashboards with the whole team to drive decisions",
            ],
        },
        (General, Manual) => Recommendation {
            tools: &["Zapier", "Notion", "Google Workspace"],
            improvements: &[
                "List every repetitive task your team does and estimate the hours it takes",
                "Start with one small automation to build confidence",
            ],
        },
        (General, PartiallyAutomated) => Recommendation {
            tools: &["Make", "Airtable", "Slack Workflows"],
            improvements: &[
                "Connect your existing automations so data flows between them",
                "Assign an owner for your automation stack",
            ],
        },
        (General, FullyAutomated) => Recommendation {
            tools: &["n8n", "Workato", "Retool"],
            improvements: &[
                "Audit automations quarterly for cost and reliability",
                "Explore AI assistants for the judgement-heavy work that remains",
            ],
        },
    }
}
