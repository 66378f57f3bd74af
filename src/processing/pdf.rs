//! PDF backends
//!
//! The layout-aware pass drives `pdf_extract::output_doc` with its own
//! [`OutputDev`], so characters arrive already decoded through the font's
//! encoding and ToUnicode map, together with the full text rendering matrix.
//! If that pass fails or recovers no text, the plain `pdf-extract` text
//! backend is used instead, with no font-size data.

use crate::processing::document::{count_words, is_indented_line, ExtractedDocument};
use log::{debug, warn};
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use std::panic::{self, UnwindSafe};

/// A vertical move larger than this many font sizes always starts a new line.
const PARAGRAPH_GAP: f64 = 1.5;
/// Moving back left and down by more than this many font sizes starts a new line.
const LINE_GAP: f64 = 0.5;
/// A horizontal gap wider than this many font sizes is a word break.
const WORD_GAP: f64 = 0.1;

#[derive(Debug, Default)]
struct PageText {
    text: String,
    font_sizes: Vec<f64>,
    page_count: usize,
}

/// Collects decoded characters and their rendered font sizes, page by page.
#[derive(Debug, Default)]
struct LayoutCollector {
    pages: Vec<String>,
    current: String,
    font_sizes: Vec<f64>,
    last_x_end: f64,
    last_y: f64,
    word_start: bool,
}

/// Extract text and layout signals from PDF bytes. Never fails.
pub fn extract_layout(bytes: &[u8]) -> ExtractedDocument {
    let extraction = match run_guarded("layout", || layout_backend(bytes)) {
        Ok(extraction) if !extraction.text.trim().is_empty() => extraction,
        Ok(_) => {
            debug!("Layout backend recovered no text, falling back to text-only extraction");
            text_only_fallback(bytes)
        }
        Err(e) => {
            warn!("Layout-aware PDF extraction failed: {}", e);
            text_only_fallback(bytes)
        }
    };

    let lines: Vec<&str> = extraction
        .text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    ExtractedDocument {
        indent_count: lines.iter().filter(|line| is_indented_line(line)).count(),
        word_count: count_words(&lines),
        text: lines.join("\n"),
        font_sizes: extraction.font_sizes,
        line_spacings: Vec::new(),
        page_count: extraction.page_count.max(1),
    }
}

/// Text of a PDF using only the text-only backend.
pub fn extract_text(bytes: &[u8]) -> String {
    text_only_fallback(bytes).text
}

fn text_only_fallback(bytes: &[u8]) -> PageText {
    match run_guarded("text-only", || text_only_backend(bytes)) {
        Ok(extraction) => extraction,
        Err(e) => {
            warn!("Text-only PDF extraction failed, continuing with empty result: {}", e);
            PageText::default()
        }
    }
}

/// Some malformed files make the parsers panic; treat that as a backend failure.
fn run_guarded<T, F>(backend: &str, f: F) -> Result<T, String>
where
    F: FnOnce() -> Result<T, String> + UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(result) => result,
        Err(_) => Err(format!("{} backend panicked", backend)),
    }
}

fn text_only_backend(bytes: &[u8]) -> Result<PageText, String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
    Ok(PageText {
        page_count: pages.len(),
        text: pages.join("\n"),
        font_sizes: Vec::new(),
    })
}

fn layout_backend(bytes: &[u8]) -> Result<PageText, String> {
    let document = Document::load_mem(bytes).map_err(|e| e.to_string())?;
    let mut collector = LayoutCollector::default();
    pdf_extract::output_doc(&document, &mut collector).map_err(|e| e.to_string())?;
    Ok(collector.finish())
}

/// Font size as rendered on the page: the `Tf` size scaled by the vertical
/// component of the text rendering matrix (text matrix times CTM).
fn rendered_font_size(trm: &Transform, font_size: f64) -> f64 {
    font_size * trm.m21.hypot(trm.m22)
}

impl LayoutCollector {
    fn finish(mut self) -> PageText {
        if !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        PageText {
            page_count: self.pages.len(),
            text: self.pages.join("\n"),
            font_sizes: self.font_sizes,
        }
    }

    fn separate(&mut self, x: f64, y: f64, size: f64) {
        if self.current.is_empty() || self.current.ends_with('\n') {
            return;
        }
        let rise = (y - self.last_y).abs();
        if rise > size * PARAGRAPH_GAP || (x < self.last_x_end && rise > size * LINE_GAP) {
            self.current.push('\n');
        } else if x > self.last_x_end + size * WORD_GAP && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }
}

impl OutputDev for LayoutCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.current.clear();
        self.word_start = false;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.pages.push(std::mem::take(&mut self.current));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let size = rendered_font_size(trm, font_size);
        let (x, y) = (trm.m31, trm.m32);

        if self.word_start {
            self.separate(x, y, size);
            self.word_start = false;
        }

        self.current.push_str(char);
        if size.is_finite() && size > 0.0 {
            for _ in char.chars() {
                self.font_sizes.push(size);
            }
        }
        self.last_y = y;
        self.last_x_end = x + width * size;
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.word_start = true;
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::DocumentFormat;
    use crate::processing::analyzer::analyze_resume;
    use crate::processing::skills::flatten_skills;

    const WINANSI_RESUME: &[u8] = include_bytes!("../../tests/fixtures/resume_winansi.pdf");
    const IDENTITY_H_RESUME: &[u8] = include_bytes!("../../tests/fixtures/resume_identity_h.pdf");
    const SCALED_RESUME: &[u8] = include_bytes!("../../tests/fixtures/resume_scaled.pdf");

    #[test]
    fn test_garbage_bytes_degrade_to_empty() {
        let document = extract_layout(b"this is not a pdf");
        assert_eq!(document.text, "");
        assert_eq!(document.page_count, 1);
        assert!(document.font_sizes.is_empty());
        assert!(document.line_spacings.is_empty());
    }

    #[test]
    fn test_text_only_on_garbage() {
        assert_eq!(extract_text(b""), "");
    }

    #[test]
    fn test_winansi_bullets_and_accents() {
        let document = extract_layout(WINANSI_RESUME);

        assert_eq!(
            document.text,
            "Jane Doe\n\
             jane@example.com | 9876543210\n\
             Summary\n\
             Python developer with 5 years of experience\n\
             • Built APIs in Python\n\
             • Built a café ordering app in Rust"
        );
        assert_eq!(document.indent_count, 2);
        assert_eq!(document.page_count, 1);
        assert!(document.font_sizes.iter().all(|size| (size - 11.0).abs() < 1e-6));
    }

    #[test]
    fn test_winansi_resume_analysis() {
        let analysis = analyze_resume(WINANSI_RESUME, DocumentFormat::Pdf).unwrap();

        assert_eq!(analysis.contacts.email.as_deref(), Some("jane@example.com"));
        assert_eq!(analysis.contacts.phone.as_deref(), Some("9876543210"));
        assert_eq!(analysis.metrics.indentations, 2);
        assert_eq!(analysis.metrics.avg_font_size, 11.0);
        assert_eq!(analysis.experience, 5);
        assert!(!analysis.suggestions.iter().any(|s| s.contains("bullets")));
    }

    #[test]
    fn test_identity_h_font_uses_to_unicode() {
        let document = extract_layout(IDENTITY_H_RESUME);

        assert_eq!(
            document.text,
            "Jane Doe\n\
             Python developer with 5 years of experience\n\
             jane@example.com\n\
             - Shipped Rust services"
        );
        assert_eq!(document.indent_count, 1);

        let analysis = analyze_resume(IDENTITY_H_RESUME, DocumentFormat::Pdf).unwrap();
        assert_eq!(analysis.contacts.email.as_deref(), Some("jane@example.com"));
        assert_eq!(analysis.experience, 5);
        assert_eq!(analysis.metrics.indentations, 1);
        assert_eq!(analysis.metrics.avg_font_size, 11.0);
        assert_eq!(flatten_skills(&analysis.skills), vec!["python", "rust"]);
    }

    #[test]
    fn test_ctm_scaling_applies_to_font_size() {
        let analysis = analyze_resume(SCALED_RESUME, DocumentFormat::Pdf).unwrap();

        assert_eq!(
            analysis.full_text,
            "Jane Doe\njane@example.com\n• Python developer with 5 years of experience"
        );
        assert_eq!(analysis.contacts.email.as_deref(), Some("jane@example.com"));
        assert_eq!(analysis.metrics.avg_font_size, 11.0);
        assert_eq!(analysis.metrics.indentations, 1);
        assert!(!analysis.suggestions.iter().any(|s| s.starts_with("Font size")));
    }

    #[test]
    fn test_collector_line_and_word_breaks() {
        let mut collector = LayoutCollector::default();
        let row = |x: f64, y: f64| Transform::row_major(1.0, 0.0, 0.0, 1.0, x, y);

        collector.begin_word().unwrap();
        collector.output_character(&row(72.0, 700.0), 0.5, 0.0, 10.0, "A").unwrap();
        // Same baseline, past the previous glyph: a word gap.
        collector.begin_word().unwrap();
        collector.output_character(&row(80.0, 700.0), 0.5, 0.0, 10.0, "B").unwrap();
        // Back to the left margin one line down.
        collector.begin_word().unwrap();
        collector.output_character(&row(72.0, 686.0), 0.5, 0.0, 10.0, "C").unwrap();
        collector.end_page().unwrap();

        let page = collector.finish();
        assert_eq!(page.text, "A B\nC");
        assert_eq!(page.page_count, 1);
        assert_eq!(page.font_sizes, vec![10.0, 10.0, 10.0]);
    }
}
