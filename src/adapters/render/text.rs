//! Plain-text renderer, used for downloadable `.txt` reports.

use super::wrap_words;
use crate::domain::report::{
    CategoryContent, CtaContent, FooterContent, HeaderContent, MetricsContent, ReportMetadata,
    ReportSection, SummaryContent,
};
use crate::ports::{RenderError, ReportRenderer};

const WIDTH: usize = 78;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn underline(title: &str, ch: char) -> String {
    format!("{}\n{}", title, ch.to_string().repeat(title.chars().count()))
}

fn wrapped(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| wrap_words(p, WIDTH).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| {
            let lines = wrap_words(item, WIDTH - 4);
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| if i == 0 { format!("  - {}", line) } else { format!("    {}", line) })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl ReportRenderer for TextRenderer {
    type Fragment = String;
    type Output = String;

    fn render_header(
        &self,
        _section: &ReportSection,
        content: &HeaderContent,
    ) -> Result<String, RenderError> {
        let mut out = vec![
            content.company_name.to_uppercase(),
            underline(&content.title, '='),
            content.subtitle.clone(),
        ];
        if let Some(name) = &content.prepared_for {
            out.push(format!("Prepared for: {}", name));
        }
        out.push(format!("Date: {}", content.generated_date));
        Ok(out.join("\n"))
    }

    fn render_summary(
        &self,
        section: &ReportSection,
        content: &SummaryContent,
    ) -> Result<String, RenderError> {
        if content.text.trim().is_empty() {
            return Err(RenderError::malformed(section, "summary text is empty"));
        }
        let mut out = vec![
            underline(section.title.as_deref().unwrap_or("Summary"), '-'),
            wrapped(&content.text),
        ];
        if let Some(disclaimer) = &content.disclaimer {
            out.push(wrapped(&format!("Note: {}", disclaimer)));
        }
        Ok(out.join("\n\n"))
    }

    fn render_metrics(
        &self,
        section: &ReportSection,
        content: &MetricsContent,
    ) -> Result<String, RenderError> {
        let mut out = vec![
            underline(section.title.as_deref().unwrap_or("Your Automation Score"), '-'),
            format!(
                "Overall score: {}/100 ({})\n{}\nEstimated time savings: {}",
                content.overall_score,
                content.overall_rating.label(),
                wrapped(&content.rating_description),
                content.total_time_savings
            ),
        ];
        if !content.top_recommendations.is_empty() {
            out.push(format!("Top recommendations:\n{}", bullets(&content.top_recommendations)));
        }
        Ok(out.join("\n\n"))
    }

    fn render_category(
        &self,
        _section: &ReportSection,
        content: &CategoryContent,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "{}\nScore: {}/100 ({})  Potential savings: {}\n\nRecommended tools:\n{}\n\nImprovements:\n{}",
            underline(&content.name, '-'),
            content.score,
            content.rating.label(),
            content.time_savings,
            bullets(&content.tools),
            bullets(&content.improvements)
        ))
    }

    fn render_cta(
        &self,
        _section: &ReportSection,
        content: &CtaContent,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "{}\n\n{}\n\n{}:\n{}",
            underline(&content.heading, '-'),
            wrapped(&content.body),
            content.button_label,
            content.url
        ))
    }

    fn render_footer(
        &self,
        _section: &ReportSection,
        content: &FooterContent,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "{}\n(c) {} {}\n{}",
            "-".repeat(WIDTH),
            content.year,
            content.company_name,
            wrapped(&content.disclaimer)
        ))
    }

    fn combine(
        &self,
        fragments: Vec<String>,
        _metadata: &ReportMetadata,
    ) -> Result<String, RenderError> {
        let mut out = fragments.join("\n\n\n");
        out.push('\n');
        Ok(out)
    }
}
