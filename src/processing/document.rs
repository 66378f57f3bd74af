//! Document extraction: raw bytes in, plain text plus layout signals out

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::text_processor::apply_ocr_fixups;
use crate::processing::{docx, pdf};
use log::debug;
use serde::{Deserialize, Serialize};

/// Characters that mark a line as indented or bulleted.
const INDENT_MARKERS: &[char] = &[' ', '\t', '•', '-', '*'];

/// Text and layout signals pulled out of one document.
///
/// Backends never fail outright: a broken file yields the default (empty)
/// value and the caller decides whether the text is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    /// Font sizes in points (per run for DOCX, per character for PDF).
    pub font_sizes: Vec<f64>,
    /// Paragraph line-spacing multipliers, where the document declares them.
    pub line_spacings: Vec<f64>,
    pub indent_count: usize,
    pub word_count: usize,
    pub page_count: usize,
}

impl ExtractedDocument {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Extract a resume-like document that carries layout information.
///
/// Only PDF and DOCX are accepted; any other declared format is an
/// `UnsupportedFormat` error. Known OCR/spacing artifacts are repaired
/// before the text is returned.
pub fn extract_document(bytes: &[u8], format: DocumentFormat) -> Result<ExtractedDocument> {
    let mut document = match format {
        DocumentFormat::Docx => docx::extract_layout(bytes),
        DocumentFormat::Pdf => pdf::extract_layout(bytes),
        other => {
            return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "{} (upload PDF or DOCX)",
                other
            )))
        }
    };

    document.text = apply_ocr_fixups(&document.text);

    debug!(
        "Extracted {} words, {} pages, {} font sizes, {} indented lines from {}",
        document.word_count,
        document.page_count,
        document.font_sizes.len(),
        document.indent_count,
        format
    );

    Ok(document)
}

pub(crate) fn is_indented_line(line: &str) -> bool {
    line.starts_with(INDENT_MARKERS)
}

pub(crate) fn count_words<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| line.as_ref().split_whitespace().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_is_fatal() {
        let err = extract_document(b"plain words", DocumentFormat::PlainText).unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));

        let err = extract_document(b"# heading", DocumentFormat::Markdown).unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_broken_docx_degrades_to_empty() {
        let document =
            extract_document(b"definitely not a zip archive", DocumentFormat::Docx).unwrap();
        assert!(!document.has_text());
        assert!(document.font_sizes.is_empty());
        assert_eq!(document.indent_count, 0);
    }

    #[test]
    fn test_broken_pdf_degrades_to_empty() {
        let document = extract_document(b"%PDF-garbage", DocumentFormat::Pdf).unwrap();
        assert!(!document.has_text());
        assert!(document.font_sizes.is_empty());
        assert_eq!(document.page_count, 1);
    }

    #[test]
    fn test_indent_markers() {
        assert!(is_indented_line("• Built APIs"));
        assert!(is_indented_line("  nested"));
        assert!(is_indented_line("\tTabbed"));
        assert!(is_indented_line("- dash"));
        assert!(is_indented_line("* star"));
        assert!(!is_indented_line("Experience"));
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(&["two words", "three more words", ""]), 5);
    }
}
