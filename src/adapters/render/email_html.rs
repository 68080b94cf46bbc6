//! Email renderer: a self-contained HTML document with inline styles only.
//!
//! Email clients strip `<style>` blocks and external stylesheets, so every
//! element carries its own `style` attribute. All report text is escaped
//! before it is embedded; the AI narrative in particular is untrusted.

use crate::domain::assessment::RatingTier;
use crate::domain::report::{
    CategoryContent, CtaContent, FooterContent, HeaderContent, MetricsContent, ReportMetadata,
    ReportSection, SummaryContent,
};
use crate::ports::{RenderError, ReportRenderer};

const FONT_STACK: &str = "Arial, Helvetica, sans-serif";
const BRAND: &str = "#1e3a8a";
const TEXT: &str = "#1f2937";
const MUTED: &str = "#6b7280";

/// Escapes text for HTML element and attribute content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped paragraphs, one `<p>` per blank-line separated block.
fn paragraphs(text: &str, style: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            format!(
                "<p style=\"{}\">{}</p>",
                style,
                escape_html(p).replace('\n', "<br>")
            )
        })
        .collect()
}

fn rating_color(tier: RatingTier) -> &'static str {
    match tier {
        RatingTier::Manual => "#dc2626",
        RatingTier::PartiallyAutomated => "#d97706",
        RatingTier::FullyAutomated => "#16a34a",
    }
}

fn list(items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|i| format!("<li style=\"margin:0 0 6px 0;\">{}</li>", escape_html(i)))
        .collect();
    format!(
        "<ul style=\"margin:8px 0 0 0;padding-left:20px;color:{};font-size:14px;line-height:1.5;\">{}</ul>",
        TEXT, items
    )
}

fn block(inner: String) -> String {
    format!(
        "<tr><td style=\"padding:24px 32px;border-bottom:1px solid #e5e7eb;\">{}</td></tr>",
        inner
    )
}

fn heading(title: &str) -> String {
    format!(
        "<h2 style=\"margin:0 0 12px 0;font-size:20px;color:{};font-family:{};\">{}</h2>",
        BRAND,
        FONT_STACK,
        escape_html(title)
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailHtmlRenderer;

impl EmailHtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for EmailHtmlRenderer {
    type Fragment = String;
    type Output = String;

    fn render_header(
        &self,
        _section: &ReportSection,
        content: &HeaderContent,
    ) -> Result<String, RenderError> {
        let prepared_for = content
            .prepared_for
            .as_deref()
            .map(|name| {
                format!(
                    "<p style=\"margin:12px 0 0 0;font-size:14px;color:#dbeafe;\">Prepared for {}</p>",
                    escape_html(name)
                )
            })
            .unwrap_or_default();

        Ok(format!(
            "<tr><td style=\"background-color:{brand};padding:32px;text-align:center;\">\
<p style=\"margin:0 0 8px 0;font-size:13px;letter-spacing:1px;text-transform:uppercase;color:#bfdbfe;\">{company}</p>\
<h1 style=\"margin:0;font-size:28px;color:#ffffff;font-family:{font};\">{title}</h1>\
<p style=\"margin:8px 0 0 0;font-size:16px;color:#dbeafe;\">{subtitle}</p>{prepared_for}\
<p style=\"margin:8px 0 0 0;font-size:12px;color:#bfdbfe;\">{date}</p></td></tr>",
            brand = BRAND,
            font = FONT_STACK,
            company = escape_html(&content.company_name),
            title = escape_html(&content.title),
            subtitle = escape_html(&content.subtitle),
            prepared_for = prepared_for,
            date = escape_html(&content.generated_date),
        ))
    }

    fn render_summary(
        &self,
        section: &ReportSection,
        content: &SummaryContent,
    ) -> Result<String, RenderError> {
        if content.text.trim().is_empty() {
            return Err(RenderError::malformed(section, "summary text is empty"));
        }

        let body_style = format!("margin:0 0 12px 0;font-size:15px;line-height:1.6;color:{};", TEXT);
        let mut inner = heading(section.title.as_deref().unwrap_or("Summary"));
        inner.push_str(&paragraphs(&content.text, &body_style));

        if let Some(disclaimer) = &content.disclaimer {
            inner.push_str(&format!(
                "<p style=\"margin:8px 0 0 0;font-size:12px;font-style:italic;color:{};\">{}</p>",
                MUTED,
                escape_html(disclaimer)
            ));
        }
        Ok(block(inner))
    }

    fn render_metrics(
        &self,
        section: &ReportSection,
        content: &MetricsContent,
    ) -> Result<String, RenderError> {
        let color = rating_color(content.overall_rating);
        let mut inner = heading(section.title.as_deref().unwrap_or("Your Automation Score"));
        inner.push_str(&format!(
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\"><tr>\
<td width=\"50%\" style=\"padding:16px;background-color:#f3f4f6;text-align:center;\">\
<p style=\"margin:0;font-size:40px;font-weight:bold;color:{color};\">{score}/100</p>\
<p style=\"margin:4px 0 0 0;font-size:14px;font-weight:bold;color:{color};\">{rating}</p></td>\
<td width=\"50%\" style=\"padding:16px;background-color:#f3f4f6;text-align:center;\">\
<p style=\"margin:0;font-size:28px;font-weight:bold;color:{brand};\">{savings}</p>\
<p style=\"margin:4px 0 0 0;font-size:14px;color:{muted};\">potential time savings</p></td>\
</tr></table>\
<p style=\"margin:16px 0 0 0;font-size:14px;line-height:1.5;color:{text};\">{description}</p>",
            color = color,
            brand = BRAND,
            muted = MUTED,
            text = TEXT,
            score = content.overall_score,
            rating = escape_html(content.overall_rating.label()),
            savings = escape_html(&content.total_time_savings),
            description = escape_html(&content.rating_description),
        ));

        if !content.top_recommendations.is_empty() {
            inner.push_str(&format!(
                "<h3 style=\"margin:20px 0 0 0;font-size:16px;color:{};\">Top Recommendations</h3>",
                TEXT
            ));
            inner.push_str(&list(&content.top_recommendations));
        }
        Ok(block(inner))
    }

    fn render_category(
        &self,
        _section: &ReportSection,
        content: &CategoryContent,
    ) -> Result<String, RenderError> {
        let color = rating_color(content.rating);
        Ok(block(format!(
            "<h3 style=\"margin:0;font-size:18px;color:{text};font-family:{font};\">{name}</h3>\
<p style=\"margin:6px 0 0 0;font-size:14px;\"><span style=\"color:{color};font-weight:bold;\">{rating}</span>\
<span style=\"color:{muted};\"> &middot; Score {score}/100 &middot; Save up to {savings}</span></p>\
<p style=\"margin:14px 0 0 0;font-size:14px;font-weight:bold;color:{text};\">Recommended tools</p>{tools}\
<p style=\"margin:14px 0 0 0;font-size:14px;font-weight:bold;color:{text};\">Improvements</p>{improvements}",
            text = TEXT,
            font = FONT_STACK,
            muted = MUTED,
            color = color,
            name = escape_html(&content.name),
            rating = escape_html(content.rating.label()),
            score = content.score,
            savings = escape_html(&content.time_savings),
            tools = list(&content.tools),
            improvements = list(&content.improvements),
        )))
    }

    fn render_cta(
        &self,
        _section: &ReportSection,
        content: &CtaContent,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "<tr><td style=\"padding:32px;background-color:#eff6ff;text-align:center;\">\
<h2 style=\"margin:0 0 12px 0;font-size:22px;color:{brand};font-family:{font};\">{heading}</h2>\
<p style=\"margin:0 0 20px 0;font-size:15px;line-height:1.6;color:{text};\">{body}</p>\
<a href=\"{url}\" style=\"display:inline-block;padding:14px 28px;background-color:{brand};color:#ffffff;\
text-decoration:none;border-radius:6px;font-weight:bold;font-size:15px;\">{label}</a></td></tr>",
            brand = BRAND,
            font = FONT_STACK,
            text = TEXT,
            heading = escape_html(&content.heading),
            body = escape_html(&content.body),
            url = escape_html(&content.url),
            label = escape_html(&content.button_label),
        ))
    }

    fn render_footer(
        &self,
        _section: &ReportSection,
        content: &FooterContent,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "<tr><td style=\"padding:24px 32px;text-align:center;\">\
<p style=\"margin:0 0 8px 0;font-size:12px;color:{muted};\">&copy; {year} {company}. All rights reserved.</p>\
<p style=\"margin:0;font-size:11px;line-height:1.5;color:#9ca3af;\">{disclaimer}</p></td></tr>",
            muted = MUTED,
            year = content.year,
            company = escape_html(&content.company_name),
            disclaimer = escape_html(&content.disclaimer),
        ))
    }

    fn combine(
        &self,
        fragments: Vec<String>,
        metadata: &ReportMetadata,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<title>Workflow Automation Audit - {date}</title></head>\
<body style=\"margin:0;padding:0;background-color:#f9fafb;font-family:{font};\">\
<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" style=\"background-color:#f9fafb;\">\
<tr><td align=\"center\" style=\"padding:24px 12px;\">\
<table role=\"presentation\" width=\"600\" cellpadding=\"0\" cellspacing=\"0\" style=\"max-width:600px;width:100%;background-color:#ffffff;border-radius:8px;\">\
{body}</table></td></tr></table></body></html>",
            date = escape_html(&metadata.generated_date),
            font = FONT_STACK,
            body = fragments.concat(),
        ))
    }
}
