//! PDF renderer: paginated A4 layout with a running vertical cursor.
//!
//! Rendering happens in two stages. Section methods produce blocks of
//! layout elements; `combine` places them top-down, breaking to a new page
//! whenever the next element's estimated height would cross the bottom
//! margin. The result is a `PdfDocumentModel` of positioned draw operations,
//! which `to_bytes` replays through `printpdf`.
//!
//! Line wrapping assumes glyphs are wider than Helvetica's real average, so
//! estimated heights err on the tall side. The cost is some extra white
//! space at page ends; text never overlaps the margin. Headings are kept on
//! the same page as the element that follows them.
//!
//! The builtin Helvetica faces only cover WinAnsi. Text outside that set is
//! rejected with an error rather than drawn with characters missing.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rect, Rgb};

use super::wrap_words;
use crate::domain::assessment::RatingTier;
use crate::domain::report::{
    CategoryContent, CtaContent, FooterContent, HeaderContent, MetricsContent, ReportMetadata,
    ReportSection, SummaryContent,
};
use crate::ports::{RenderError, ReportRenderer};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

const PT_TO_MM: f32 = 0.3528;
/// Assumed glyph width in ems; Helvetica averages closer to 0.5.
const GLYPH_WIDTH_EM: f32 = 0.55;
const LINE_SPACING: f32 = 1.4;

const BRAND: Rgb8 = Rgb8(30, 58, 138);
const TEXT: Rgb8 = Rgb8(31, 41, 55);
const MUTED: Rgb8 = Rgb8(107, 114, 128);
const TRACK: Rgb8 = Rgb8(229, 231, 235);

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl From<Rgb8> for Color {
    fn from(c: Rgb8) -> Self {
        Color::Rgb(Rgb::new(
            f32::from(c.0) / 255.0,
            f32::from(c.1) / 255.0,
            f32::from(c.2) / 255.0,
            None,
        ))
    }
}

fn rating_color(tier: RatingTier) -> Rgb8 {
    match tier {
        RatingTier::Manual => Rgb8(220, 38, 38),
        RatingTier::PartiallyAutomated => Rgb8(217, 119, 6),
        RatingTier::FullyAutomated => Rgb8(22, 163, 74),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// A layout element, positioned by `combine`.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfElement {
    Text {
        text: String,
        size: f32,
        style: FontStyle,
        color: Rgb8,
        indent_mm: f32,
        /// Never end a page on this element.
        keep_with_next: bool,
    },
    /// Horizontal divider across the content width.
    Rule,
    /// Filled progress bar for a 0-100 score.
    ScoreBar { score: u8, color: Rgb8 },
    Spacer(f32),
}

impl PdfElement {
    fn text(text: impl Into<String>, size: f32, style: FontStyle, color: Rgb8) -> Self {
        PdfElement::Text {
            text: text.into(),
            size,
            style,
            color,
            indent_mm: 0.0,
            keep_with_next: false,
        }
    }

    /// A heading-style line that stays with what follows it.
    fn title(text: impl Into<String>, size: f32, color: Rgb8) -> Self {
        PdfElement::Text {
            text: text.into(),
            size,
            style: FontStyle::Bold,
            color,
            indent_mm: 0.0,
            keep_with_next: true,
        }
    }

    fn bullet(text: &str) -> Self {
        PdfElement::Text {
            text: format!("- {}", text),
            size: 10.5,
            style: FontStyle::Regular,
            color: TEXT,
            indent_mm: 4.0,
            keep_with_next: false,
        }
    }

    fn keeps_with_next(&self) -> bool {
        matches!(
            self,
            PdfElement::Text {
                keep_with_next: true,
                ..
            }
        )
    }

    /// Height this element will occupy, including trailing gap.
    pub fn estimated_height(&self) -> f32 {
        match self {
            PdfElement::Text {
                text,
                size,
                indent_mm,
                ..
            } => {
                let lines = wrap_words(text, chars_per_line(*size, *indent_mm)).len().max(1);
                lines as f32 * line_height(*size) + paragraph_gap(*size)
            }
            PdfElement::Rule => 6.0,
            PdfElement::ScoreBar { .. } => 9.0,
            PdfElement::Spacer(h) => *h,
        }
    }
}

fn content_width() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

fn chars_per_line(size: f32, indent_mm: f32) -> usize {
    let glyph = size * PT_TO_MM * GLYPH_WIDTH_EM;
    (((content_width() - indent_mm) / glyph).floor() as usize).max(10)
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

fn paragraph_gap(size: f32) -> f32 {
    size * PT_TO_MM * 0.6
}

/// Whether the builtin fonts' WinAnsi encoding has a code for `c`.
fn win_ansi_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž' | '‘'
                | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž' | 'Ÿ'
        )
}

/// First character in `text` the PDF fonts cannot draw. Whitespace is
/// collapsed by wrapping, so it never reaches the page.
fn first_unencodable(text: &str) -> Option<char> {
    text.chars()
        .find(|c| !c.is_whitespace() && !win_ansi_encodable(*c))
}

/// One section's worth of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfBlock(pub Vec<PdfElement>);

impl PdfBlock {
    fn push(&mut self, element: PdfElement) {
        self.0.push(element);
    }

    fn heading(&mut self, title: &str) {
        self.push(PdfElement::title(title, 16.0, BRAND));
    }

    fn paragraphs(&mut self, text: &str, size: f32) {
        for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            self.push(PdfElement::text(paragraph, size, FontStyle::Regular, TEXT));
        }
    }

    /// Fails if any text in the block would lose characters in the PDF.
    fn checked(self, section: &ReportSection) -> Result<Self, RenderError> {
        for element in &self.0 {
            if let PdfElement::Text { text, .. } = element {
                if let Some(c) = first_unencodable(text) {
                    return Err(RenderError::malformed(
                        section,
                        format!("character {:?} (U+{:04X}) has no glyph in the PDF fonts", c, c as u32),
                    ));
                }
            }
        }
        Ok(self)
    }
}

/// A positioned drawing operation. `y_mm` is measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x_mm: f32,
        y_mm: f32,
        size: f32,
        style: FontStyle,
        color: Rgb8,
        text: String,
    },
    Rect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        color: Rgb8,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub ops: Vec<DrawOp>,
}

/// A laid-out document, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocumentModel {
    pub title: String,
    pub pages: Vec<PdfPage>,
}

impl PdfDocumentModel {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text drawn, in drawing order, one line per text operation.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rect { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serializes the document with `printpdf`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let backend = |e: printpdf::Error| RenderError::Backend(e.to_string());

        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(backend)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(backend)?;
        let italic = doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(backend)?;
        let font = |style: FontStyle| -> &IndirectFontRef {
            match style {
                FontStyle::Regular => &regular,
                FontStyle::Bold => &bold,
                FontStyle::Italic => &italic,
            }
        };

        for (index, page) in self.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            for op in &page.ops {
                match op {
                    DrawOp::Text {
                        x_mm,
                        y_mm,
                        size,
                        style,
                        color,
                        text,
                    } => {
                        if let Some(c) = first_unencodable(text) {
                            return Err(RenderError::Backend(format!(
                                "character {:?} (U+{:04X}) has no glyph in the PDF fonts",
                                c, c as u32
                            )));
                        }
                        layer.set_fill_color((*color).into());
                        layer.use_text(text.clone(), *size, Mm(*x_mm), Mm(PAGE_HEIGHT_MM - *y_mm), font(*style));
                    }
                    DrawOp::Rect {
                        x_mm,
                        y_mm,
                        width_mm,
                        height_mm,
                        color,
                    } => {
                        layer.set_fill_color((*color).into());
                        layer.add_rect(Rect::new(
                            Mm(*x_mm),
                            Mm(PAGE_HEIGHT_MM - *y_mm - *height_mm),
                            Mm(*x_mm + *width_mm),
                            Mm(PAGE_HEIGHT_MM - *y_mm),
                        ));
                    }
                }
            }
        }

        doc.save_to_bytes().map_err(backend)
    }
}

/// Places elements top-down and breaks pages at the bottom margin.
struct Layout {
    pages: Vec<PdfPage>,
    cursor: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![PdfPage::default()],
            cursor: MARGIN_MM,
        }
    }

    fn bottom() -> f32 {
        PAGE_HEIGHT_MM - MARGIN_MM
    }

    fn at_page_top(&self) -> bool {
        self.cursor <= MARGIN_MM
    }

    fn new_page(&mut self) {
        self.pages.push(PdfPage::default());
        self.cursor = MARGIN_MM;
    }

    fn current(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Places every element in order. A run of keep-with-next elements
    /// moves to a new page together with the element that ends it.
    fn lay_out(elements: Vec<PdfElement>) -> Vec<PdfPage> {
        let reserves: Vec<f32> = {
            let mut reserves = vec![0.0; elements.len()];
            let mut following = 0.0;
            for (i, element) in elements.iter().enumerate().rev() {
                let height = element.estimated_height();
                reserves[i] = if element.keeps_with_next() {
                    height + following
                } else {
                    height
                };
                following = reserves[i];
            }
            reserves
        };

        let mut layout = Self::new();
        for (element, reserve) in elements.into_iter().zip(reserves) {
            layout.place(element, reserve);
        }
        layout.pages
    }

    /// `reserve` is the height that must fit on this page: the element's own
    /// height, plus what it is kept with.
    fn place(&mut self, element: PdfElement, reserve: f32) {
        let height = element.estimated_height();
        let needed = reserve.max(height).min(Self::bottom() - MARGIN_MM);
        if self.cursor + needed > Self::bottom() && !self.at_page_top() {
            self.new_page();
        }

        match element {
            PdfElement::Text {
                text,
                size,
                style,
                color,
                indent_mm,
                ..
            } => {
                let step = line_height(size);
                for line in wrap_words(&text, chars_per_line(size, indent_mm)) {
                    // Elements taller than a page continue line by line.
                    if self.cursor + step > Self::bottom() && !self.at_page_top() {
                        self.new_page();
                    }
                    let baseline = self.cursor + size * PT_TO_MM;
                    self.current().ops.push(DrawOp::Text {
                        x_mm: MARGIN_MM + indent_mm,
                        y_mm: baseline,
                        size,
                        style,
                        color,
                        text: line,
                    });
                    self.cursor += step;
                }
                self.cursor += paragraph_gap(size);
            }
            PdfElement::Rule => {
                let y_mm = self.cursor + 2.5;
                self.current().ops.push(DrawOp::Rect {
                    x_mm: MARGIN_MM,
                    y_mm,
                    width_mm: content_width(),
                    height_mm: 0.4,
                    color: TRACK,
                });
                self.cursor += height;
            }
            PdfElement::ScoreBar { score, color } => {
                let y_mm = self.cursor + 1.5;
                let filled = content_width() * f32::from(score.min(100)) / 100.0;
                let page = self.current();
                page.ops.push(DrawOp::Rect {
                    x_mm: MARGIN_MM,
                    y_mm,
                    width_mm: content_width(),
                    height_mm: 4.0,
                    color: TRACK,
                });
                if filled > 0.0 {
                    page.ops.push(DrawOp::Rect {
                        x_mm: MARGIN_MM,
                        y_mm,
                        width_mm: filled,
                        height_mm: 4.0,
                        color,
                    });
                }
                self.cursor += height;
            }
            PdfElement::Spacer(h) => {
                self.cursor += h;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for PdfRenderer {
    type Fragment = PdfBlock;
    type Output = PdfDocumentModel;

    fn render_header(
        &self,
        section: &ReportSection,
        content: &HeaderContent,
    ) -> Result<PdfBlock, RenderError> {
        let mut block = PdfBlock::default();
        block.push(PdfElement::text(&content.company_name, 10.0, FontStyle::Bold, MUTED));
        block.push(PdfElement::title(&content.title, 24.0, BRAND));
        block.push(PdfElement::text(&content.subtitle, 13.0, FontStyle::Regular, TEXT));
        if let Some(name) = &content.prepared_for {
            block.push(PdfElement::text(
                format!("Prepared for {}", name),
                11.0,
                FontStyle::Regular,
                TEXT,
            ));
        }
        block.push(PdfElement::text(&content.generated_date, 10.0, FontStyle::Regular, MUTED));
        block.push(PdfElement::Rule);
        block.checked(section)
    }

    fn render_summary(
        &self,
        section: &ReportSection,
        content: &SummaryContent,
    ) -> Result<PdfBlock, RenderError> {
        if content.text.trim().is_empty() {
            return Err(RenderError::malformed(section, "summary text is empty"));
        }
        let mut block = PdfBlock::default();
        block.heading(section.title.as_deref().unwrap_or("Summary"));
        block.paragraphs(&content.text, 11.0);
        if let Some(disclaimer) = &content.disclaimer {
            block.push(PdfElement::text(disclaimer, 8.5, FontStyle::Italic, MUTED));
        }
        block.push(PdfElement::Spacer(4.0));
        block.checked(section)
    }

    fn render_metrics(
        &self,
        section: &ReportSection,
        content: &MetricsContent,
    ) -> Result<PdfBlock, RenderError> {
        let color = rating_color(content.overall_rating);
        let mut block = PdfBlock::default();
        block.heading(section.title.as_deref().unwrap_or("Your Automation Score"));
        block.push(PdfElement::text(
            format!(
                "Overall score: {}/100 ({})",
                content.overall_score,
                content.overall_rating.label()
            ),
            13.0,
            FontStyle::Bold,
            color,
        ));
        block.push(PdfElement::ScoreBar {
            score: content.overall_score,
            color,
        });
        block.push(PdfElement::text(&content.rating_description, 10.5, FontStyle::Regular, TEXT));
        block.push(PdfElement::text(
            format!("Estimated time savings: {}", content.total_time_savings),
            11.0,
            FontStyle::Bold,
            BRAND,
        ));
        if !content.top_recommendations.is_empty() {
            block.push(PdfElement::title("Top Recommendations", 12.0, TEXT));
            for recommendation in &content.top_recommendations {
                block.push(PdfElement::bullet(recommendation));
            }
        }
        block.push(PdfElement::Spacer(4.0));
        block.checked(section)
    }

    fn render_category(
        &self,
        section: &ReportSection,
        content: &CategoryContent,
    ) -> Result<PdfBlock, RenderError> {
        let color = rating_color(content.rating);
        let mut block = PdfBlock::default();
        block.push(PdfElement::title(&content.name, 14.0, BRAND));
        block.push(PdfElement::title(
            format!(
                "{} | Score {}/100 | Potential savings {}",
                content.rating.label(),
                content.score,
                content.time_savings
            ),
            10.0,
            color,
        ));
        block.push(PdfElement::ScoreBar {
            score: content.score,
            color,
        });
        block.push(PdfElement::title("Recommended tools", 11.0, TEXT));
        for tool in &content.tools {
            block.push(PdfElement::bullet(tool));
        }
        block.push(PdfElement::title("Improvements", 11.0, TEXT));
        for improvement in &content.improvements {
            block.push(PdfElement::bullet(improvement));
        }
        block.push(PdfElement::Spacer(5.0));
        block.checked(section)
    }

    fn render_cta(
        &self,
        section: &ReportSection,
        content: &CtaContent,
    ) -> Result<PdfBlock, RenderError> {
        let mut block = PdfBlock::default();
        block.push(PdfElement::Rule);
        block.heading(&content.heading);
        block.push(PdfElement::text(&content.body, 11.0, FontStyle::Regular, TEXT));
        block.push(PdfElement::text(
            format!("{}: {}", content.button_label, content.url),
            11.0,
            FontStyle::Bold,
            BRAND,
        ));
        block.checked(section)
    }

    fn render_footer(
        &self,
        section: &ReportSection,
        content: &FooterContent,
    ) -> Result<PdfBlock, RenderError> {
        let mut block = PdfBlock::default();
        block.push(PdfElement::Rule);
        block.push(PdfElement::text(
            format!("Copyright {} {}. All rights reserved.", content.year, content.company_name),
            9.0,
            FontStyle::Regular,
            MUTED,
        ));
        block.push(PdfElement::text(&content.disclaimer, 8.0, FontStyle::Italic, MUTED));
        block.checked(section)
    }

    fn combine(
        &self,
        fragments: Vec<PdfBlock>,
        metadata: &ReportMetadata,
    ) -> Result<PdfDocumentModel, RenderError> {
        let elements = fragments.into_iter().flat_map(|block| block.0).collect();

        Ok(PdfDocumentModel {
            title: format!("Workflow Automation Audit - {}", metadata.generated_date),
            pages: Layout::lay_out(elements),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess_all, AnswerSet};
    use crate::domain::report::{build, ReportOptions};

    fn render(summary: Option<&str>) -> PdfDocumentModel {
        let mut audit = assess_all(&AnswerSet::new());
        if let Some(summary) = summary {
            audit = audit.with_summary(summary);
        }
        PdfRenderer::new()
            .render(&build(&audit, &ReportOptions::default()))
            .unwrap()
    }

    fn text_ops(model: &PdfDocumentModel) -> Vec<(f32, f32)> {
        model
            .pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { y_mm, size, .. } => Some((*y_mm, *size)),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn full_report_spans_multiple_pages() {
        let model = render(None);
        assert!(model.page_count() >= 2, "got {} pages", model.page_count());
    }

    #[test]
    fn nothing_is_drawn_below_the_bottom_margin() {
        let long = "Automation narrative sentence that goes on for a while. ".repeat(200);
        let model = render(Some(&long));
        for (y, _) in text_ops(&model) {
            assert!(y <= PAGE_HEIGHT_MM - MARGIN_MM, "text at {}mm", y);
            assert!(y >= MARGIN_MM);
        }
        for page in &model.pages {
            for op in &page.ops {
                if let DrawOp::Rect { y_mm, height_mm, .. } = op {
                    assert!(y_mm + height_mm <= PAGE_HEIGHT_MM - MARGIN_MM);
                }
            }
        }
    }

    #[test]
    fn wrapped_lines_fit_the_content_width() {
        let long = "word ".repeat(400);
        let model = render(Some(&long));
        for page in &model.pages {
            for op in &page.ops {
                if let DrawOp::Text { text, size, x_mm, .. } = op {
                    let width = text.chars().count() as f32 * size * PT_TO_MM * GLYPH_WIDTH_EM;
                    assert!(x_mm + width <= PAGE_WIDTH_MM - MARGIN_MM + 0.01);
                }
            }
        }
    }

    fn words(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn every_category_is_present() {
        let audit = assess_all(&AnswerSet::new());
        let model = PdfRenderer
            .render(&build(&audit, &ReportOptions::default()))
            .unwrap();
        // Wrapped lines rejoin into the original words.
        let text = words(&model.text());
        for category in &audit.categories {
            assert!(text.contains(category.category.display_name()));
            assert!(text.contains(&format!(
                "{} | Score {}/100",
                category.rating.label(),
                category.score
            )));
            for tool in &category.tools {
                assert!(text.contains(&words(tool)), "missing tool {}", tool);
            }
            for improvement in &category.improvements {
                assert!(
                    text.contains(&words(improvement)),
                    "missing improvement {}",
                    improvement
                );
            }
        }
    }

    #[test]
    fn text_outside_the_font_encoding_is_rejected() {
        let audit = assess_all(&AnswerSet::new()).with_summary("Zoe says 日本 ✓ ok");
        let result = PdfRenderer.render(&build(&audit, &ReportOptions::default()));
        assert!(matches!(
            result,
            Err(RenderError::MalformedSection { ref reason, .. }) if reason.contains("U+65E5")
        ));

        let options = ReportOptions {
            user_name: Some("李雷".to_string()),
            ..ReportOptions::default()
        };
        let result = PdfRenderer.render(&build(&assess_all(&AnswerSet::new()), &options));
        assert!(matches!(result, Err(RenderError::MalformedSection { .. })));
    }

    #[test]
    fn latin_punctuation_and_accents_are_drawn() {
        let summary = "Zoë’s café – “ready” for €5… naïve résumé";
        let audit = assess_all(&AnswerSet::new()).with_summary(summary);
        let model = PdfRenderer
            .render(&build(&audit, &ReportOptions::default()))
            .unwrap();
        assert!(words(&model.text()).contains(summary));
        assert!(model.to_bytes().is_ok());
    }

    #[test]
    fn serialization_rejects_unencodable_text() {
        let model = PdfDocumentModel {
            title: "t".to_string(),
            pages: vec![PdfPage {
                ops: vec![DrawOp::Text {
                    x_mm: MARGIN_MM,
                    y_mm: MARGIN_MM,
                    size: 11.0,
                    style: FontStyle::Regular,
                    color: TEXT,
                    text: "ok 🚀".to_string(),
                }],
            }],
        };
        assert!(matches!(model.to_bytes(), Err(RenderError::Backend(_))));
    }

    #[test]
    fn heading_moves_to_the_next_page_with_its_content() {
        let heading = PdfElement::title("Recommended tools", 11.0, TEXT);
        let bullet = PdfElement::bullet("Zapier");
        // Room for the heading alone, not for the heading and its bullet.
        let filler = Layout::bottom() - MARGIN_MM - heading.estimated_height() - 0.5;

        let pages = Layout::lay_out(vec![PdfElement::Spacer(filler), heading, bullet]);

        assert_eq!(pages.len(), 2);
        assert!(pages[0].ops.is_empty());
        let drawn: Vec<&str> = pages[1]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rect { .. } => None,
            })
            .collect();
        assert_eq!(drawn, vec!["Recommended tools", "- Zapier"]);
    }

    #[test]
    fn plain_text_is_not_pushed_to_the_next_page() {
        let line = PdfElement::text("Plain paragraph", 11.0, FontStyle::Regular, TEXT);
        let bullet = PdfElement::bullet("Zapier");
        let filler = Layout::bottom() - MARGIN_MM - line.estimated_height() - 0.5;

        let pages = Layout::lay_out(vec![PdfElement::Spacer(filler), line, bullet]);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ops.len(), 1);
    }

    #[test]
    fn no_page_ends_on_a_category_heading() {
        let model = render(None);
        let headings: Vec<String> = assess_all(&AnswerSet::new())
            .categories
            .iter()
            .map(|c| c.category.display_name().to_string())
            .chain(["Recommended tools".to_string(), "Improvements".to_string()])
            .collect();
        for page in &model.pages[..model.pages.len() - 1] {
            let last_text = page.ops.iter().rev().find_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                DrawOp::Rect { .. } => None,
            });
            if let Some(last) = last_text {
                assert!(!headings.contains(&last), "page ends on {}", last);
            }
        }
    }

    #[test]
    fn estimated_height_grows_with_text() {
        let short = PdfElement::text("short", 11.0, FontStyle::Regular, TEXT);
        let long = PdfElement::text("long ".repeat(100), 11.0, FontStyle::Regular, TEXT);
        assert!(long.estimated_height() > short.estimated_height());
    }

    #[test]
    fn serializes_to_pdf_bytes() {
        let bytes = render(None).to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
