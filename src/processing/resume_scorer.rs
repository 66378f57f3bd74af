//! Resume formatting rubric

use crate::processing::document::ExtractedDocument;
use crate::processing::entities::{ContactInfo, SectionPresence};
use crate::processing::round_to;
use serde::{Deserialize, Serialize};

pub const FONT_SIZE_SMALL_PENALTY: u8 = 12;
pub const FONT_SIZE_LARGE_PENALTY: u8 = 6;
pub const NO_INDENTATION_PENALTY: u8 = 6;
pub const MISSING_EMAIL_PENALTY: u8 = 10;
pub const MISSING_PHONE_PENALTY: u8 = 8;
pub const MISSING_LINKEDIN_PENALTY: u8 = 5;
pub const MISSING_GITHUB_PENALTY: u8 = 4;
pub const MISSING_SECTION_PENALTY: u8 = 15;

const MIN_FONT_SIZE: f64 = 10.0;
const MAX_FONT_SIZE: f64 = 13.5;
/// Assumed body size when the document reports no font sizes.
const DEFAULT_FONT_SIZE: f64 = 11.0;
const TECHNICAL_ROLE_MARKERS: &[&str] = &["developer", "engineer", "scientist", "data", "software"];

/// Layout signals reported alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub avg_font_size: f64,
    pub avg_line_spacing: f64,
    pub indentations: usize,
    pub blank_lines: usize,
    pub sections_found: SectionPresence,
    pub words: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingScore {
    pub score: u8,
    pub suggestions: Vec<String>,
}

impl LayoutMetrics {
    /// Summarize an extracted document whose text has already been fixed up.
    pub fn from_document(document: &ExtractedDocument, sections: SectionPresence) -> Self {
        let avg_font_size = mean(&document.font_sizes)
            .map(|avg| round_to(avg, 1))
            .unwrap_or(DEFAULT_FONT_SIZE);

        let avg_line_spacing = mean(&document.line_spacings)
            .map(|avg| round_to(avg, 2))
            .unwrap_or_else(|| blank_line_ratio(&document.text));

        Self {
            avg_font_size,
            avg_line_spacing,
            indentations: document.indent_count,
            blank_lines: document.text.lines().filter(|line| line.trim().is_empty()).count(),
            sections_found: sections,
            words: document.word_count,
            pages: document.page_count,
        }
    }
}

/// Apply the fixed penalty rubric. Starts at 100 and only ever subtracts.
pub fn score_formatting(
    metrics: &LayoutMetrics,
    contacts: &ContactInfo,
    sections: &SectionPresence,
    text: &str,
) -> FormattingScore {
    let mut score: i32 = 100;
    let mut suggestions = Vec::new();
    let mut penalize = |penalty: u8, suggestion: String| {
        score -= i32::from(penalty);
        suggestions.push(suggestion);
    };

    if metrics.avg_font_size < MIN_FONT_SIZE {
        penalize(
            FONT_SIZE_SMALL_PENALTY,
            "Font size is small. Use 11–12pt for readability.".to_string(),
        );
    } else if metrics.avg_font_size > MAX_FONT_SIZE {
        penalize(
            FONT_SIZE_LARGE_PENALTY,
            "Font size is large. Prefer an 11–12pt range.".to_string(),
        );
    }

    if metrics.indentations == 0 {
        penalize(
            NO_INDENTATION_PENALTY,
            "Use bullets/indentation to improve scannability.".to_string(),
        );
    }

    if contacts.email.is_none() {
        penalize(MISSING_EMAIL_PENALTY, "Add a valid email address.".to_string());
    }
    if contacts.phone.is_none() {
        penalize(MISSING_PHONE_PENALTY, "Add a reachable phone number.".to_string());
    }
    if contacts.linkedin.is_none() {
        penalize(
            MISSING_LINKEDIN_PENALTY,
            "Consider adding a LinkedIn profile link.".to_string(),
        );
    }
    if contacts.github.is_none() && looks_technical(text) {
        penalize(
            MISSING_GITHUB_PENALTY,
            "This appears to be a technical role; a GitHub profile is highly recommended."
                .to_string(),
        );
    }

    let missing: Vec<&str> = sections
        .missing_critical()
        .iter()
        .map(|section| section.as_str())
        .collect();
    if !missing.is_empty() {
        penalize(
            MISSING_SECTION_PENALTY,
            format!("Add missing critical sections: {}.", missing.join(", ")),
        );
    }

    FormattingScore {
        score: score.clamp(0, 100) as u8,
        suggestions,
    }
}

fn looks_technical(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TECHNICAL_ROLE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn blank_line_ratio(text: &str) -> f64 {
    let lines: Vec<&str> = text.lines().collect();
    let blank = lines.iter().filter(|line| line.trim().is_empty()).count();
    round_to(blank as f64 / lines.len().max(1) as f64, 2)
}
