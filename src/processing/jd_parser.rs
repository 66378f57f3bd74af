//! Job description parsing

use crate::processing::entities::{
    extract_education, extract_experience, extract_job_title, EducationRecord, UNSPECIFIED_TITLE,
};
use crate::processing::skills::{ExtractedSkills, SkillExtractor};
use log::debug;
use serde::{Deserialize, Serialize};

/// Requirements pulled out of a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionAnalysis {
    pub job_title: String,
    pub required_skills: ExtractedSkills,
    pub experience_required: u32,
    pub education_required: Vec<EducationRecord>,
    pub raw_text: String,
}

impl JobDescriptionAnalysis {
    /// The result for an empty or unusable description.
    pub fn unspecified() -> Self {
        Self {
            job_title: UNSPECIFIED_TITLE.to_string(),
            required_skills: ExtractedSkills::new(),
            experience_required: 0,
            education_required: Vec::new(),
            raw_text: String::new(),
        }
    }

    pub fn requires_education(&self) -> bool {
        !self.education_required.is_empty()
    }
}

/// Parse job-description text with the strict skill matcher.
pub fn parse_job_description(text: &str) -> JobDescriptionAnalysis {
    parse_job_description_with(text, SkillExtractor::global())
}

/// Parse job-description text with a specific skill extractor.
pub fn parse_job_description_with(text: &str, skills: &SkillExtractor) -> JobDescriptionAnalysis {
    if text.trim().is_empty() {
        return JobDescriptionAnalysis::unspecified();
    }

    let analysis = JobDescriptionAnalysis {
        job_title: extract_job_title(text),
        required_skills: skills.extract(text),
        experience_required: extract_experience(text),
        education_required: extract_education(text),
        raw_text: text.to_string(),
    };

    debug!(
        "Parsed job description '{}': {} skill categories, {} years, {} education requirements",
        analysis.job_title,
        analysis.required_skills.len(),
        analysis.experience_required,
        analysis.education_required.len()
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::entities::Degree;
    use crate::processing::skills::SkillCategory;

    const JOB: &str = "Senior Data Engineer\n\
                       Acme Analytics\n\
                       We need at least 4 years of experience with Python, SQL and Airflow on AWS.\n\
                       Bachelor of Technology in Computer Science or Information Technology";

    #[test]
    fn test_parse_job_description() {
        let jd = parse_job_description(JOB);

        assert_eq!(jd.job_title, "Senior Data Engineer");
        assert_eq!(jd.experience_required, 4);
        assert_eq!(jd.education_required.len(), 1);
        assert_eq!(jd.education_required[0].degree, Degree::Bachelor);
        assert_eq!(
            jd.education_required[0].field,
            "Computer Science or Information Technology"
        );
        assert!(jd.required_skills[&SkillCategory::Programming].contains("python"));
        assert!(jd.required_skills[&SkillCategory::Cloud].contains("aws"));
        assert!(jd.requires_education());
        assert_eq!(jd.raw_text, JOB);
    }

    #[test]
    fn test_empty_job_description() {
        assert_eq!(parse_job_description(""), JobDescriptionAnalysis::unspecified());
        assert_eq!(parse_job_description("  \n ").job_title, UNSPECIFIED_TITLE);
    }
}
