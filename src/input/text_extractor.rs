//! Plain-text extraction for job descriptions

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::{docx, pdf};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> String;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        pdf::extract_text(bytes)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        docx::extract_text(bytes)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let markdown_content = String::from_utf8_lossy(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        let stripped = HTML_TAG.replace_all(&text, "");
        let unescaped = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = unescaped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Decode a job description of any supported format into plain text.
///
/// Returns `ExtractionEmpty` when nothing but whitespace comes out.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes),
        DocumentFormat::Docx => DocxExtractor.extract(bytes),
        DocumentFormat::PlainText => PlainTextExtractor.extract(bytes),
        DocumentFormat::Markdown => MarkdownExtractor.extract(bytes),
    };

    if text.trim().is_empty() {
        return Err(ResumeAnalyzerError::ExtractionEmpty(format!(
            "no text found in {} job description",
            format
        )));
    }
    Ok(text)
}
