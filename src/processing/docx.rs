//! DOCX (WordprocessingML) backend
//!
//! Reads `word/document.xml` out of the package and walks the body
//! paragraphs. Paragraphs inside tables are skipped, matching what a
//! plain paragraph walk of the document body sees.

use crate::processing::document::{count_words, is_indented_line, ExtractedDocument};
use log::warn;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use thiserror::Error;

const DOCUMENT_PART: &str = "word/document.xml";
/// Left indents above this many points count as indentation.
const INDENT_THRESHOLD_PT: f64 = 2.0;
const TWIPS_PER_POINT: f64 = 20.0;
/// `w:spacing/@w:line` is expressed in 240ths of a line for auto spacing.
const AUTO_LINE_UNIT: f64 = 240.0;
const PARAGRAPHS_PER_PAGE: usize = 30;

#[derive(Error, Debug)]
enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml attribute error: {0}")]
    Attribute(#[from] AttrError),
}

#[derive(Debug, Default)]
struct Paragraph {
    text: String,
    font_sizes: Vec<f64>,
    line_spacing: Option<f64>,
    left_indent_pt: Option<f64>,
}

/// Accumulates layout signals while walking the XML event stream.
#[derive(Debug, Default)]
struct BodyWalker {
    table_depth: usize,
    paragraph_depth: usize,
    current: Option<Paragraph>,
    in_paragraph_props: bool,
    in_run: bool,
    in_run_props: bool,
    in_text: bool,

    lines: Vec<String>,
    font_sizes: Vec<f64>,
    line_spacings: Vec<f64>,
    indent_count: usize,
    paragraph_count: usize,
}

/// Extract text and layout signals from DOCX bytes. Never fails: a
/// malformed package yields an empty document.
pub fn extract_layout(bytes: &[u8]) -> ExtractedDocument {
    match parse_layout(bytes) {
        Ok(document) => document,
        Err(e) => {
            warn!("DOCX extraction failed, continuing with empty result: {}", e);
            ExtractedDocument::default()
        }
    }
}

/// Plain paragraph text of a DOCX package, one non-empty paragraph per line.
pub fn extract_text(bytes: &[u8]) -> String {
    extract_layout(bytes).text
}

fn parse_layout(bytes: &[u8]) -> Result<ExtractedDocument, DocxError> {
    let xml = read_document_xml(bytes)?;
    let mut reader = Reader::from_str(&xml);
    let mut walker = BodyWalker::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => walker.open(&e, false)?,
            Event::Empty(e) => walker.open(&e, true)?,
            Event::End(e) => walker.close(e.name().as_ref()),
            Event::Text(t) => {
                if walker.in_text {
                    let text = t.unescape()?;
                    walker.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.finish())
}

fn read_document_xml(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

fn attribute_f64(e: &BytesStart, name: &str) -> Result<Option<f64>, DocxError> {
    match e.try_get_attribute(name)? {
        Some(attr) => {
            let value = attr.unescape_value()?;
            Ok(value.trim().parse::<f64>().ok())
        }
        None => Ok(None),
    }
}

fn attribute_string(e: &BytesStart, name: &str) -> Result<Option<String>, DocxError> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

impl BodyWalker {
    fn in_body_paragraph(&self) -> bool {
        self.table_depth == 0 && self.current.is_some()
    }

    fn open(&mut self, e: &BytesStart, is_empty: bool) -> Result<(), DocxError> {
        match e.name().as_ref() {
            b"w:tbl" if !is_empty => self.table_depth += 1,
            b"w:p" => {
                if self.table_depth > 0 {
                    return Ok(());
                }
                if is_empty {
                    self.paragraph_count += 1;
                } else {
                    self.paragraph_depth += 1;
                    if self.paragraph_depth == 1 {
                        self.current = Some(Paragraph::default());
                    }
                }
            }
            b"w:pPr" if !is_empty => self.in_paragraph_props = true,
            b"w:r" if !is_empty => self.in_run = true,
            b"w:rPr" if !is_empty => self.in_run_props = true,
            b"w:t" if !is_empty => self.in_text = true,
            b"w:tab" if self.in_run => self.push_text("\t"),
            b"w:br" | b"w:cr" if self.in_run => self.push_text("\n"),
            b"w:ind" if self.in_paragraph_props && !self.in_run_props => {
                let left = match attribute_f64(e, "w:left")? {
                    Some(value) => Some(value),
                    None => attribute_f64(e, "w:start")?,
                };
                if let (Some(twips), Some(paragraph)) = (left, self.current.as_mut()) {
                    paragraph.left_indent_pt = Some(twips / TWIPS_PER_POINT);
                }
            }
            b"w:spacing" if self.in_paragraph_props && !self.in_run_props => {
                let line = attribute_f64(e, "w:line")?;
                let rule = attribute_string(e, "w:lineRule")?;
                // Exact and at-least rules are absolute heights, not multipliers.
                let is_multiplier = rule.as_deref().map_or(true, |r| r == "auto");
                if let (Some(line), true, Some(paragraph)) =
                    (line, is_multiplier, self.current.as_mut())
                {
                    paragraph.line_spacing = Some(line / AUTO_LINE_UNIT);
                }
            }
            b"w:sz" if self.in_run && self.in_run_props => {
                if let (Some(half_points), Some(paragraph)) =
                    (attribute_f64(e, "w:val")?, self.current.as_mut())
                {
                    paragraph.font_sizes.push(half_points / 2.0);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"w:p" if self.table_depth == 0 => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.paragraph_depth == 0 {
                    if let Some(paragraph) = self.current.take() {
                        self.finish_paragraph(paragraph);
                    }
                }
            }
            b"w:pPr" => self.in_paragraph_props = false,
            b"w:r" => self.in_run = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:t" => self.in_text = false,
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.in_body_paragraph() {
            return;
        }
        if let Some(paragraph) = self.current.as_mut() {
            paragraph.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraph_count += 1;

        let trimmed = paragraph.text.trim();
        if !trimmed.is_empty() {
            self.lines.push(trimmed.to_string());
        }

        self.font_sizes.extend(paragraph.font_sizes);
        if let Some(spacing) = paragraph.line_spacing {
            self.line_spacings.push(spacing);
        }

        let indented_by_layout = paragraph
            .left_indent_pt
            .map_or(false, |pt| pt > INDENT_THRESHOLD_PT);
        if indented_by_layout || is_indented_line(&paragraph.text) {
            self.indent_count += 1;
        }
    }

    fn finish(self) -> ExtractedDocument {
        ExtractedDocument {
            word_count: count_words(&self.lines),
            text: self.lines.join("\n"),
            font_sizes: self.font_sizes,
            line_spacings: self.line_spacings,
            indent_count: self.indent_count,
            page_count: (self.paragraph_count / PARAGRAPHS_PER_PAGE).max(1),
        }
    }
}
