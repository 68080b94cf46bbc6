//! Report Renderers - Implementations of the ReportRenderer port.
//!
//! - `UiRenderer` - View tree for the web client (JSON)
//! - `EmailHtmlRenderer` - Inline-styled HTML for email bodies
//! - `PdfRenderer` - Paginated A4 document
//! - `TextRenderer` - Plain text download

mod email_html;
mod pdf;
mod text;
mod ui;

pub use email_html::{escape_html, EmailHtmlRenderer};
pub use pdf::{
    DrawOp, FontStyle, PdfBlock, PdfDocumentModel, PdfElement, PdfPage, PdfRenderer, Rgb8,
    MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
pub use text::TextRenderer;
pub use ui::{BadgeTone, CalloutTone, TabPanel, UiFragment, UiRenderer, ViewNode};

use crate::domain::report::{FormattedReport, SectionContent, COMPANY_NAME};
use crate::ports::{RenderError, RenderFormat, ReportRenderer};

/// A report rendered to bytes, ready to serve.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    pub format: RenderFormat,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Set for formats served as downloads.
    pub filename: Option<String>,
}

/// Renders `report` with the renderer for `format`.
pub fn render_artifact(
    format: RenderFormat,
    report: &FormattedReport,
) -> Result<RenderedArtifact, RenderError> {
    let body = match format {
        RenderFormat::Ui => {
            let tree = UiRenderer.render(report)?;
            serde_json::to_vec(&tree).map_err(|e| RenderError::Backend(e.to_string()))?
        }
        RenderFormat::Html => EmailHtmlRenderer.render(report)?.into_bytes(),
        RenderFormat::Pdf => PdfRenderer.render(report)?.to_bytes()?,
        RenderFormat::Text => TextRenderer.render(report)?.into_bytes(),
    };

    Ok(RenderedArtifact {
        format,
        content_type: format.content_type(),
        body,
        filename: format.attachment_name(company_name(report)),
    })
}

fn company_name(report: &FormattedReport) -> &str {
    report
        .sections
        .iter()
        .find_map(|s| match &s.content {
            SectionContent::Header(header) => Some(header.company_name.as_str()),
            _ => None,
        })
        .unwrap_or(COMPANY_NAME)
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Words longer than `width` are split. Single newlines in the input are
/// kept as line breaks. Always returns at least one line.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in raw_line.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(width) {
                let piece_len = piece.len();
                if current_len > 0 && current_len + 1 + piece_len > width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(piece);
                current_len += piece_len;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
