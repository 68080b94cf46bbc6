//! UI renderer: the report as a tree of view nodes for the web client.
//!
//! This is the one renderer that does not map sections one-to-one onto
//! output blocks. Category sections become tab panels, and `combine` groups
//! them into a single `Tabs` node placed where the first category section
//! stood. Every other section keeps its position.

use serde::Serialize;

use crate::domain::assessment::RatingTier;
use crate::domain::report::{
    CategoryContent, CtaContent, FooterContent, HeaderContent, MetricsContent, ReportMetadata,
    ReportSection, SummaryContent, SummaryVariant,
};
use crate::ports::{RenderError, ReportRenderer};

/// A node of the rendered view tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewNode {
    Page {
        children: Vec<ViewNode>,
    },
    Hero {
        title: String,
        subtitle: String,
        company_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        prepared_for: Option<String>,
        generated_date: String,
    },
    Callout {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        tone: CalloutTone,
        body: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        disclaimer: Option<String>,
    },
    ScoreCard {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        score: u8,
        rating: RatingTier,
        badge: BadgeTone,
        description: String,
        time_savings: String,
        top_recommendations: Vec<String>,
    },
    Tabs {
        tabs: Vec<TabPanel>,
    },
    ActionBanner {
        heading: String,
        body: String,
        button_label: String,
        href: String,
    },
    Footer {
        text: String,
        disclaimer: String,
    },
}

/// One category tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabPanel {
    pub id: String,
    pub label: String,
    pub score: u8,
    pub rating: RatingTier,
    pub badge: BadgeTone,
    pub tools: Vec<String>,
    pub improvements: Vec<String>,
    pub time_savings: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutTone {
    /// AI generated; the client shows a disclaimer badge.
    Ai,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Danger,
    Warning,
    Success,
}

impl From<RatingTier> for BadgeTone {
    fn from(tier: RatingTier) -> Self {
        match tier {
            RatingTier::Manual => BadgeTone::Danger,
            RatingTier::PartiallyAutomated => BadgeTone::Warning,
            RatingTier::FullyAutomated => BadgeTone::Success,
        }
    }
}

/// Per-section output before grouping.
#[derive(Debug, Clone, PartialEq)]
pub enum UiFragment {
    Node(ViewNode),
    Tab(TabPanel),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for UiRenderer {
    type Fragment = UiFragment;
    type Output = ViewNode;

    fn render_header(
        &self,
        _section: &ReportSection,
        content: &HeaderContent,
    ) -> Result<UiFragment, RenderError> {
        Ok(UiFragment::Node(ViewNode::Hero {
            title: content.title.clone(),
            subtitle: content.subtitle.clone(),
            company_name: content.company_name.clone(),
            prepared_for: content.prepared_for.clone(),
            generated_date: content.generated_date.clone(),
        }))
    }

    fn render_summary(
        &self,
        section: &ReportSection,
        content: &SummaryContent,
    ) -> Result<UiFragment, RenderError> {
        if content.text.trim().is_empty() {
            return Err(RenderError::malformed(section, "summary text is empty"));
        }
        let tone = match content.variant {
            SummaryVariant::Ai => CalloutTone::Ai,
            SummaryVariant::Personalized => CalloutTone::Info,
        };
        Ok(UiFragment::Node(ViewNode::Callout {
            title: section.title.clone(),
            tone,
            body: content.text.clone(),
            disclaimer: content.disclaimer.clone(),
        }))
    }

    fn render_metrics(
        &self,
        section: &ReportSection,
        content: &MetricsContent,
    ) -> Result<UiFragment, RenderError> {
        Ok(UiFragment::Node(ViewNode::ScoreCard {
            title: section.title.clone(),
            score: content.overall_score,
            rating: content.overall_rating,
            badge: content.overall_rating.into(),
            description: content.rating_description.clone(),
            time_savings: content.total_time_savings.clone(),
            top_recommendations: content.top_recommendations.clone(),
        }))
    }

    fn render_category(
        &self,
        section: &ReportSection,
        content: &CategoryContent,
    ) -> Result<UiFragment, RenderError> {
        Ok(UiFragment::Tab(TabPanel {
            id: section.id.clone(),
            label: content.name.clone(),
            score: content.score,
            rating: content.rating,
            badge: content.rating.into(),
            tools: content.tools.clone(),
            improvements: content.improvements.clone(),
            time_savings: content.time_savings.clone(),
        }))
    }

    fn render_cta(
        &self,
        _section: &ReportSection,
        content: &CtaContent,
    ) -> Result<UiFragment, RenderError> {
        Ok(UiFragment::Node(ViewNode::ActionBanner {
            heading: content.heading.clone(),
            body: content.body.clone(),
            button_label: content.button_label.clone(),
            href: content.url.clone(),
        }))
    }

    fn render_footer(
        &self,
        _section: &ReportSection,
        content: &FooterContent,
    ) -> Result<UiFragment, RenderError> {
        Ok(UiFragment::Node(ViewNode::Footer {
            text: format!("© {} {}", content.year, content.company_name),
            disclaimer: content.disclaimer.clone(),
        }))
    }

    fn combine(
        &self,
        fragments: Vec<UiFragment>,
        _metadata: &ReportMetadata,
    ) -> Result<ViewNode, RenderError> {
        let mut children: Vec<ViewNode> = Vec::with_capacity(fragments.len());
        let mut tabs_at: Option<usize> = None;

        for fragment in fragments {
            match fragment {
                UiFragment::Node(node) => children.push(node),
                UiFragment::Tab(panel) => match tabs_at {
                    Some(index) => {
                        if let Some(ViewNode::Tabs { tabs }) = children.get_mut(index) {
                            tabs.push(panel);
                        }
                    }
                    None => {
                        tabs_at = Some(children.len());
                        children.push(ViewNode::Tabs { tabs: vec![panel] });
                    }
                },
            }
        }

        Ok(ViewNode::Page { children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};
    use crate::domain::report::{build, ReportOptions};

    fn page() -> Vec<ViewNode> {
        let report = build(&assess_all(&AnswerSet::new()), &ReportOptions::default());
        match UiRenderer::new().render(&report).unwrap() {
            ViewNode::Page { children } => children,
            other => panic!("expected page, got {:?}", other),
        }
    }

    #[test]
    fn categories_are_grouped_into_one_tabs_node() {
        let children = page();

        let tab_nodes: Vec<&ViewNode> = children
            .iter()
            .filter(|n| matches!(n, ViewNode::Tabs { .. }))
            .collect();
        assert_eq!(tab_nodes.len(), 1);

        let ViewNode::Tabs { tabs } = tab_nodes[0] else {
            unreachable!()
        };
        let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Task Management", "Customer Communication", "Data Entry", "Scheduling", "Reporting"]
        );
    }

    #[test]
    fn tabs_sit_where_the_first_category_was() {
        let children = page();
        // hero, callout, score card, tabs, banner, footer
        assert_eq!(children.len(), 6);
        assert!(matches!(children[0], ViewNode::Hero { .. }));
        assert!(matches!(children[2], ViewNode::ScoreCard { .. }));
        assert!(matches!(children[3], ViewNode::Tabs { .. }));
        assert!(matches!(children[4], ViewNode::ActionBanner { .. }));
        assert!(matches!(children[5], ViewNode::Footer { .. }));
    }

    #[test]
    fn tab_panels_keep_tools_and_improvements() {
        let children = page();
        let Some(ViewNode::Tabs { tabs }) = children.iter().find(|n| matches!(n, ViewNode::Tabs { .. })) else {
            panic!("no tabs");
        };
        for tab in tabs {
            assert!(!tab.tools.is_empty());
            assert!(!tab.improvements.is_empty());
            assert_eq!(tab.badge, BadgeTone::Danger);
        }
    }

    #[test]
    fn ai_summary_uses_ai_tone() {
        let audit = assess_all(&AnswerSet::new()).with_summary("AI says hi");
        let report = build(&audit, &ReportOptions::default());
        let ViewNode::Page { children } = UiRenderer.render(&report).unwrap() else {
            panic!("expected page");
        };
        assert!(matches!(
            &children[1],
            ViewNode::Callout { tone: CalloutTone::Ai, disclaimer: Some(_), .. }
        ));
    }

    #[test]
    fn view_tree_serializes_with_kind_tags() {
        let report = build(&assess_all(&AnswerSet::new()), &ReportOptions::default());
        let json = serde_json::to_value(UiRenderer.render(&report).unwrap()).unwrap();
        assert_eq!(json["kind"], "page");
        assert_eq!(json["children"][0]["kind"], "hero");
        assert_eq!(json["children"][3]["tabs"][0]["rating"], "Manual");
    }
}
