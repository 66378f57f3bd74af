//! Resume analysis pipeline: extraction, entities, formatting score

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::document::extract_document;
use crate::processing::entities::{
    detect_sections, extract_contacts_with_min_digits, extract_education, extract_experience,
    ContactInfo, EducationRecord,
};
use crate::processing::resume_scorer::{score_formatting, LayoutMetrics};
use crate::processing::skills::{ExtractedSkills, SkillExtractor};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Everything learned about one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// Formatting score, 0 to 100.
    pub score: u8,
    pub metrics: LayoutMetrics,
    pub contacts: ContactInfo,
    pub suggestions: Vec<String>,
    pub full_text: String,
    pub education: Vec<EducationRecord>,
    /// Years of experience, the largest figure mentioned.
    pub experience: u32,
    pub skills: ExtractedSkills,
}

/// Runs the resume pipeline with a fixed set of extraction switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeAnalyzer {
    options: ExtractionConfig,
}

impl ResumeAnalyzer {
    pub fn new(options: &ExtractionConfig) -> Self {
        Self { options: *options }
    }

    /// Analyze resume bytes of the declared format.
    ///
    /// Fails only when the format is not PDF/DOCX or when no text at all
    /// could be recovered. Everything else degrades to empty fields.
    pub fn analyze(&self, bytes: &[u8], format: DocumentFormat) -> Result<ResumeAnalysis> {
        let start_time = Instant::now();

        let document = extract_document(bytes, format)?;
        if !document.has_text() {
            return Err(ResumeAnalyzerError::ExtractionEmpty(format!(
                "no text found in {} document",
                format
            )));
        }

        let text = &document.text;
        let contacts = extract_contacts_with_min_digits(text, self.options.min_phone_digits);
        let sections = detect_sections(text);
        let metrics = LayoutMetrics::from_document(&document, sections);
        let formatting = score_formatting(&metrics, &contacts, &sections, text);

        let skills = SkillExtractor::for_policy(self.options.allow_plural_skills).extract(text);
        let education = extract_education(text);
        let experience = extract_experience(text);

        debug!(
            "Resume entities: {} skill categories, {} education records, {} years",
            skills.len(),
            education.len(),
            experience
        );
        info!(
            "Resume analyzed in {}ms with formatting score {}",
            start_time.elapsed().as_millis(),
            formatting.score
        );

        Ok(ResumeAnalysis {
            score: formatting.score,
            metrics,
            contacts,
            suggestions: formatting.suggestions,
            full_text: document.text,
            education,
            experience,
            skills,
        })
    }
}

/// Analyze a resume with the default extraction switches.
pub fn analyze_resume(bytes: &[u8], format: DocumentFormat) -> Result<ResumeAnalysis> {
    ResumeAnalyzer::default().analyze(bytes, format)
}
