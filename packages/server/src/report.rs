//! PDF rendering for the participation report.
//!
//! Layout is a heading, a half-inch spacer and one wrapped body paragraph on
//! A4, using the built-in Helvetica faces so no font files are needed.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_MM: f32 = 25.4;
const SPACER_MM: f32 = 12.7;

const HEADING_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;

const PT_TO_MM: f32 = 0.352_778;

/// Width of the text column in points.
const BODY_WIDTH_PT: f32 = (PAGE_WIDTH.0 - 2.0 * MARGIN_MM) / PT_TO_MM;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Anything outside the table is measured as a full em.
const FALLBACK_WIDTH: u16 = 1000;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render PDF: {0}")]
    Pdf(String),
}

impl ReportError {
    fn pdf(err: impl std::fmt::Debug) -> Self {
        ReportError::Pdf(format!("{err:?}"))
    }
}

/// Render `title` and `summary` into an in-memory PDF.
pub fn render_report(title: &str, summary: &str) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Report");
    let heading_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(ReportError::pdf)?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(ReportError::pdf)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT.0 - MARGIN_MM - HEADING_SIZE * PT_TO_MM;

    current.use_text(title, HEADING_SIZE, Mm(MARGIN_MM), Mm(y), &heading_font);
    y -= SPACER_MM + BODY_LEADING * PT_TO_MM;

    for line in wrap_text(summary, BODY_SIZE, BODY_WIDTH_PT) {
        if y < MARGIN_MM {
            let (next_page, next_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Report");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT.0 - MARGIN_MM - BODY_SIZE * PT_TO_MM;
        }
        write_line(&current, &line, &body_font, y);
        y -= BODY_LEADING * PT_TO_MM;
    }

    doc.save_to_bytes().map_err(ReportError::pdf)
}

fn write_line(layer: &PdfLayerReference, line: &str, font: &IndirectFontRef, y: f32) {
    layer.use_text(line, BODY_SIZE, Mm(MARGIN_MM), Mm(y), font);
}

/// Rendered width of `text` in Helvetica at `size` points.
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            u32::from(match c {
                ' '..='~' => HELVETICA_WIDTHS[c as usize - 32],
                _ => FALLBACK_WIDTH,
            })
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap against the measured width. Words wider than `max_width`
/// get a line of their own.
fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && text_width(&format!("{line} {word}"), size) > max_width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
