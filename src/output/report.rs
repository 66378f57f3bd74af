//! Combined analysis report: resume analysis plus an optional job match

use crate::processing::analyzer::ResumeAnalysis;
use crate::processing::entities::EducationRecord;
use crate::processing::jd_parser::JobDescriptionAnalysis;
use crate::processing::matcher::MatchResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a client sees of the parsed job description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptionSummary {
    pub job_title: String,
    pub required_experience: u32,
    pub required_education: Vec<EducationRecord>,
}

/// Serializes as the resume analysis fields, with `jd_analysis` and
/// `job_description` added when a job description was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub resume: ResumeAnalysis,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_analysis: Option<MatchResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<JobDescriptionSummary>,

    #[serde(skip)]
    pub generated_at: DateTime<Utc>,
}

impl From<&JobDescriptionAnalysis> for JobDescriptionSummary {
    fn from(jd: &JobDescriptionAnalysis) -> Self {
        Self {
            job_title: jd.job_title.clone(),
            required_experience: jd.experience_required,
            required_education: jd.education_required.clone(),
        }
    }
}

impl AnalysisReport {
    /// Report for a resume analyzed on its own.
    pub fn resume_only(resume: ResumeAnalysis) -> Self {
        Self {
            resume,
            jd_analysis: None,
            job_description: None,
            generated_at: Utc::now(),
        }
    }

    /// Report for a resume scored against a job description.
    pub fn with_match(
        resume: ResumeAnalysis,
        jd: &JobDescriptionAnalysis,
        result: MatchResult,
    ) -> Self {
        Self {
            resume,
            jd_analysis: Some(result),
            job_description: Some(JobDescriptionSummary::from(jd)),
            generated_at: Utc::now(),
        }
    }

    pub fn has_match(&self) -> bool {
        self.jd_analysis.is_some()
    }
}

/// Tagged error body used in place of a report when analysis fails.
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
