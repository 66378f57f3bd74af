//! Resume to job-description match scoring

use crate::config::ScoringConfig;
use crate::processing::analyzer::ResumeAnalysis;
use crate::processing::entities::{Degree, EducationRecord};
use crate::processing::jd_parser::JobDescriptionAnalysis;
use crate::processing::round_to;
use crate::processing::skills::flatten_skills;
use crate::processing::text_processor::{keyword_similarity, normalize_text, partial_ratio};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Divisor applied to a fuzzy field ratio, so a fuzzy hit never scores as an exact one.
const FUZZY_FIELD_DIVISOR: f64 = 115.0;

/// Bidirectional skill aliases (alias, expansion).
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("py", "python"),
    ("c#", "csharp"),
    ("c++", "cpp"),
    ("reactjs", "react"),
    ("nodejs", "node"),
    ("aws", "amazon web services"),
    ("gcp", "google cloud platform"),
    ("sql server", "microsoft sql server"),
    ("html5", "html"),
    ("css3", "css"),
    ("tensorflow", "tf"),
    ("pytorch", "torch"),
    ("k8s", "kubernetes"),
    ("visual studio code", "vs code"),
    ("mssql", "sql server"),
    ("ci/cd", "continuous integration and continuous deployment"),
    ("devops", "development and operations"),
    ("db", "database"),
    ("dbms", "database management system"),
    ("oop", "object oriented programming"),
    ("mvc", "model view controller"),
    ("rest", "representational state transfer"),
    ("api", "application programming interface"),
    ("oauth", "open authorization"),
];

const FIELD_ALIASES: &[(&str, &str)] = &[
    ("ai", "artificial intelligence"),
    ("ml", "machine learning"),
    ("cs", "computer science"),
    ("it", "information technology"),
    ("ece", "electronics and communication engineering"),
    ("eee", "electrical and electronics engineering"),
];

static FIELD_ALIAS_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    FIELD_ALIASES
        .iter()
        .map(|(alias, expansion)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(alias));
            (Regex::new(&pattern).expect("Invalid field alias regex"), *expansion)
        })
        .collect()
});

/// One (resume education, required education) comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationPairMatch {
    pub resume_degree: Degree,
    pub jd_degree: Degree,
    pub degree_score: f64,
    pub resume_field: String,
    pub jd_field: String,
    pub field_score: f64,
    pub combined_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationDetails {
    pub resume_education: Vec<EducationRecord>,
    pub jd_requirements: Vec<EducationRecord>,
    pub matches: Vec<EducationPairMatch>,
    pub best_match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub keyword_match: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub education_details: EducationDetails,
}

/// Weighted resume/job-description scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, resume: &ResumeAnalysis, jd: &JobDescriptionAnalysis) -> MatchResult {
        let resume_skills = flatten_skills(&resume.skills);
        let jd_skills = flatten_skills(&jd.required_skills);
        let threshold = self.config.field_fuzzy_threshold;

        let skill_match = skill_similarity(&resume_skills, &jd_skills) * 100.0;
        let experience_match =
            experience_similarity(resume.experience, jd.experience_required) * 100.0;
        let education_details =
            education_details_with(&resume.education, &jd.education_required, threshold);
        let education_match = if jd.education_required.is_empty() {
            100.0
        } else if resume.education.is_empty() {
            0.0
        } else {
            education_details.best_match_score * 100.0
        };
        let keyword_match = keyword_similarity(&resume.full_text, &jd.raw_text) * 100.0;

        let c = &self.config;
        let mut overall = skill_match * c.skill_weight
            + experience_match * c.experience_weight
            + education_match * c.education_weight
            + keyword_match * c.keyword_weight;

        if education_match < c.education_penalty_threshold && jd.requires_education() {
            debug!(
                "Education match {:.1}% below {:.1}%, capping overall score at {:.1}",
                education_match, c.education_penalty_threshold, c.overall_score_cap
            );
            overall = overall.min(c.overall_score_cap);
        }
        let overall_score = round_to(overall.clamp(0.0, 100.0), 1);

        info!(
            "Match score {:.1} (skills {:.1}, experience {:.1}, education {:.1}, keywords {:.1})",
            overall_score, skill_match, experience_match, education_match, keyword_match
        );

        MatchResult {
            overall_score,
            skill_match: round_to(skill_match, 1),
            experience_match: round_to(experience_match, 1),
            education_match: round_to(education_match, 1),
            keyword_match: round_to(keyword_match, 1),
            matching_skills: find_matching_skills(&resume_skills, &jd_skills),
            missing_skills: find_missing_skills(&resume_skills, &jd_skills),
            education_details,
        }
    }
}

/// Score a resume against a job description with the default weights.
pub fn calculate_match_score(resume: &ResumeAnalysis, jd: &JobDescriptionAnalysis) -> MatchResult {
    MatchScorer::default().score(resume, jd)
}

/// Lowercased skills plus their alias expansions and contractions.
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> HashSet<String> {
    let mut normalized = HashSet::new();
    for skill in skills {
        let lowered = skill.as_ref().to_lowercase();
        for (alias, expansion) in SKILL_ALIASES {
            if lowered == *alias {
                normalized.insert(expansion.to_string());
            }
            if lowered == *expansion {
                normalized.insert(alias.to_string());
            }
        }
        normalized.insert(lowered);
    }
    normalized
}

/// Share of required skills the resume covers. Trivially 1.0 with no requirements.
pub fn skill_similarity<S: AsRef<str>>(resume_skills: &[S], jd_skills: &[S]) -> f64 {
    if jd_skills.is_empty() {
        return 1.0;
    }
    let jd_set = normalize_skills(jd_skills);
    if jd_set.is_empty() {
        return 1.0;
    }
    let resume_set = normalize_skills(resume_skills);
    resume_set.intersection(&jd_set).count() as f64 / jd_set.len() as f64
}

/// Required skills (as the job description spells them) the resume covers,
/// directly or through an alias.
pub fn find_matching_skills<S: AsRef<str>>(resume_skills: &[S], jd_skills: &[S]) -> Vec<String> {
    if jd_skills.is_empty() || resume_skills.is_empty() {
        return Vec::new();
    }
    partition_required(resume_skills, jd_skills).0
}

/// Required skills the resume does not cover under any alias.
pub fn find_missing_skills<S: AsRef<str>>(resume_skills: &[S], jd_skills: &[S]) -> Vec<String> {
    if jd_skills.is_empty() {
        return Vec::new();
    }
    partition_required(resume_skills, jd_skills).1
}

fn partition_required<S: AsRef<str>>(
    resume_skills: &[S],
    jd_skills: &[S],
) -> (Vec<String>, Vec<String>) {
    let resume_set = normalize_skills(resume_skills);
    let required: BTreeSet<String> = jd_skills
        .iter()
        .map(|skill| skill.as_ref().to_lowercase())
        .collect();

    required.into_iter().partition(|skill| {
        normalize_skills(&[skill.as_str()])
            .iter()
            .any(|variant| resume_set.contains(variant))
    })
}

/// Linear partial credit below the required years.
pub fn experience_similarity(resume_years: u32, jd_years: u32) -> f64 {
    if jd_years == 0 || resume_years >= jd_years {
        1.0
    } else {
        f64::from(resume_years) / f64::from(jd_years)
    }
}

pub fn degree_match_score(resume_degree: &Degree, jd_degree: &Degree) -> f64 {
    if jd_degree.is_empty() {
        return 1.0;
    }
    if resume_degree.is_empty() {
        return 0.0;
    }

    match (resume_degree.rank(), jd_degree.rank()) {
        (Some(resume_rank), Some(jd_rank)) => {
            if resume_rank >= jd_rank {
                1.0
            } else if jd_rank - resume_rank == 1 {
                0.5
            } else {
                0.1
            }
        }
        _ if resume_degree == jd_degree => 0.75,
        _ => 0.0,
    }
}

/// Field-of-study score with the default fuzzy threshold.
pub fn field_match_score(resume_field: &str, jd_field: &str) -> f64 {
    field_match_score_with(resume_field, jd_field, ScoringConfig::default().field_fuzzy_threshold)
}

fn field_match_score_with(resume_field: &str, jd_field: &str, threshold: f64) -> f64 {
    if jd_field.trim().is_empty() {
        return 1.0;
    }
    if resume_field.trim().is_empty() {
        return 0.0;
    }

    let resume_norm = normalize_text(&expand_field_aliases(resume_field));
    let accepted: Vec<String> = jd_field
        .split(" or ")
        .map(|option| normalize_text(&expand_field_aliases(option.trim())))
        .collect();

    if accepted.contains(&resume_norm) {
        return 1.0;
    }

    let best = accepted
        .iter()
        .filter(|option| !option.is_empty())
        .map(|option| partial_ratio(&resume_norm, option))
        .fold(0.0_f64, f64::max);

    if best > threshold {
        best / FUZZY_FIELD_DIVISOR
    } else {
        0.0
    }
}

/// Replace whole-word field abbreviations ("cs", "ml") with their full names.
pub fn expand_field_aliases(text: &str) -> String {
    let mut expanded = text.to_string();
    for (pattern, expansion) in FIELD_ALIAS_PATTERNS.iter() {
        expanded = pattern.replace_all(&expanded, *expansion).into_owned();
    }
    expanded
}

/// Every (required, resume) pairing, with the best combined score.
pub fn education_details(resume: &[EducationRecord], jd: &[EducationRecord]) -> EducationDetails {
    education_details_with(resume, jd, ScoringConfig::default().field_fuzzy_threshold)
}

fn education_details_with(
    resume: &[EducationRecord],
    jd: &[EducationRecord],
    threshold: f64,
) -> EducationDetails {
    let mut details = EducationDetails {
        resume_education: resume.to_vec(),
        jd_requirements: jd.to_vec(),
        matches: Vec::new(),
        best_match_score: 0.0,
    };
    if resume.is_empty() || jd.is_empty() {
        return details;
    }

    let mut best = 0.0_f64;
    for requirement in jd {
        for item in resume {
            let degree_score = degree_match_score(&item.degree, &requirement.degree);
            let field_score = field_match_score_with(&item.field, &requirement.field, threshold);
            let combined_score = degree_score * field_score;
            best = best.max(combined_score);

            details.matches.push(EducationPairMatch {
                resume_degree: item.degree.clone(),
                jd_degree: requirement.degree.clone(),
                degree_score: round_to(degree_score, 2),
                resume_field: item.field.clone(),
                jd_field: requirement.field.clone(),
                field_score: round_to(field_score, 2),
                combined_score: round_to(combined_score, 2),
            });
        }
    }

    details.best_match_score = round_to(best, 2);
    details
}

/// Best education fit in 0..=1. No requirement is a full match; a
/// requirement against no resume education is none.
pub fn education_similarity(resume: &[EducationRecord], jd: &[EducationRecord]) -> f64 {
    if jd.is_empty() {
        return 1.0;
    }
    if resume.is_empty() {
        return 0.0;
    }
    education_details(resume, jd).best_match_score
}
