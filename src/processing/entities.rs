//! Pattern-based entity extraction: experience, education, contacts,
//! section presence and job titles

use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Sentinel title used when a job description yields nothing.
pub const UNSPECIFIED_TITLE: &str = "Not specified";

const DEFAULT_MIN_PHONE_DIGITS: usize = 10;
const TITLE_SCAN_LINES: usize = 3;
const TITLE_MAX_WORDS: usize = 10;
const TITLE_KEYWORDS: &[&str] = &[
    "engineer", "developer", "analyst", "manager", "scientist", "specialist", "architect",
];

static EXPERIENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+)\+?\s*years?\s*(?:of)?\s*experience",
        r"(?i)experience\s*:\s*(\d+)\+?\s*years?",
        r"(?i)(\d+)\s*years?\s*(?:in|of)",
        r"(?i)(\d+)\s*-\s*(\d+)\s*years?\s*experience",
        r"(?i)minimum\s*of\s*(\d+)\s*years",
        r"(?i)at least\s*(\d+)\s*years",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid experience regex"))
    .collect()
});

/// Degree rules in priority order; the first rule matching a sentence wins.
static DEGREE_PATTERNS: LazyLock<Vec<(Regex, Degree)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(bachelor\s+of\s+engineering|b\.?e\.?)\b", Degree::Bachelor),
        (r"(?i)\b(bachelor\s+of\s+technology|b\.?tech)\b", Degree::Bachelor),
        (r"(?i)\b(bachelor\s+of\s+science|b\.?sc\.?)\b", Degree::Bachelor),
        (r"(?i)\b(bachelor['s]?)\b", Degree::Bachelor),
        (r"(?i)\b(master\s+of\s+engineering|m\.?e\.?)\b", Degree::Master),
        (r"(?i)\b(master\s+of\s+technology|m\.?tech)\b", Degree::Master),
        (r"(?i)\b(master\s+of\s+science|m\.?sc\.?)\b", Degree::Master),
        (r"(?i)\b(master\s+of\s+business\s+administration|mba)\b", Degree::Master),
        (r"(?i)\b(master['s]?)\b", Degree::Master),
        (r"(?i)\b(doctorate|phd|ph\.d)\b", Degree::Phd),
    ]
    .into_iter()
    .map(|(pattern, degree)| (Regex::new(pattern).expect("Invalid degree regex"), degree))
    .collect()
});

static FIELD_OF_STUDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:in|of)?\s+([\w\s]+(?:(?:and|&)\s*[\w\s]+)*)")
        .expect("Invalid field of study regex")
});

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\n]").expect("Invalid sentence regex"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").expect("Invalid email regex"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+91[-\s]*)?(?:\d{3}[-\s]*\d{3}[-\s]*\d{4}|\d{10})")
        .expect("Invalid phone regex")
});

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/(in|pub)/[a-zA-Z0-9_-]+").expect("Invalid LinkedIn regex")
});

static GITHUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)github\.com/[a-zA-Z0-9_.-]{1,39}/?").expect("Invalid GitHub regex")
});

/// Keyword variants per section, matched as plain substrings.
const SECTION_KEYWORDS: &[(Section, &[&str])] = &[
    (Section::Summary, &["summary", "objective", "profile"]),
    (Section::Education, &["education", "academic", "qualification", "coursework"]),
    (Section::Experience, &["experience", "employment", "work history", "professional"]),
    (Section::Skills, &["skills", "technical skills", "technologies", "tools", "tech stack"]),
    (
        Section::Certificates,
        &["certificates", "certifications", "certification", "licenses", "courses"],
    ),
    (Section::Projects, &["projects", "academic projects", "personal projects"]),
];

static SECTION_MATCHER: LazyLock<(AhoCorasick, Vec<Section>)> = LazyLock::new(|| {
    let mut patterns = Vec::new();
    let mut owners = Vec::new();
    for (section, keywords) in SECTION_KEYWORDS {
        for keyword in keywords.iter() {
            patterns.push(*keyword);
            owners.push(*section);
        }
    }
    let matcher = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(&patterns)
        .expect("Failed to build section matcher");
    (matcher, owners)
});

/// Academic degree level. Extraction only ever yields the three ranked
/// levels; `Other` keeps labels that arrive from elsewhere (deserialized
/// records, unusual abbreviations) and is never ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Degree {
    Bachelor,
    Master,
    Phd,
    Other(String),
}

impl Degree {
    /// Resolve a label through the common abbreviation table ("b.tech", "m.sc", "ph.d").
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "bachelor" | "b.e" | "b.e." | "btech" | "b.tech" | "b.tech." | "b.sc" | "b.sc." => {
                Degree::Bachelor
            }
            "master" | "m.e" | "m.e." | "mtech" | "m.tech" | "m.tech." | "m.sc" | "m.sc."
            | "mba" => {
                Degree::Master
            }
            "phd" | "ph.d" | "doctorate" => Degree::Phd,
            other => Degree::Other(other.to_string()),
        }
    }

    /// Position in the bachelor < master < phd ordering.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Degree::Bachelor => Some(3),
            Degree::Master => Some(4),
            Degree::Phd => Some(5),
            Degree::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Degree::Bachelor => "bachelor",
            Degree::Master => "master",
            Degree::Phd => "phd",
            Degree::Other(label) => label,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Degree::Other(label) if label.trim().is_empty())
    }
}

impl From<String> for Degree {
    fn from(label: String) -> Self {
        Degree::from_label(&label)
    }
}

impl From<Degree> for String {
    fn from(degree: Degree) -> Self {
        degree.as_str().to_string()
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: Degree,
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Education,
    Experience,
    Skills,
    Certificates,
    Projects,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Certificates => "certificates",
            Section::Projects => "projects",
        }
    }
}

/// Which resume sections are mentioned anywhere in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPresence {
    pub summary: bool,
    pub education: bool,
    pub experience: bool,
    pub skills: bool,
    pub certificates: bool,
    pub projects: bool,
}

impl SectionPresence {
    pub fn is_present(&self, section: Section) -> bool {
        match section {
            Section::Summary => self.summary,
            Section::Education => self.education,
            Section::Experience => self.experience,
            Section::Skills => self.skills,
            Section::Certificates => self.certificates,
            Section::Projects => self.projects,
        }
    }

    fn mark(&mut self, section: Section) {
        match section {
            Section::Summary => self.summary = true,
            Section::Education => self.education = true,
            Section::Experience => self.experience = true,
            Section::Skills => self.skills = true,
            Section::Certificates => self.certificates = true,
            Section::Projects => self.projects = true,
        }
    }

    /// Missing sections among experience, skills and education, in that order.
    pub fn missing_critical(&self) -> Vec<Section> {
        [Section::Experience, Section::Skills, Section::Education]
            .into_iter()
            .filter(|section| !self.is_present(*section))
            .collect()
    }
}

/// Largest number of years mentioned by any experience phrase, or 0.
pub fn extract_experience(text: &str) -> u32 {
    if text.trim().is_empty() {
        return 0;
    }

    let mut max_years = 0;
    for pattern in EXPERIENCE_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            let years = captures
                .iter()
                .skip(1)
                .flatten()
                .filter_map(|group| match group.as_str().parse::<u32>() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        debug!("Skipping experience figure '{}': {}", group.as_str(), e);
                        None
                    }
                })
                .max();
            if let Some(years) = years {
                max_years = max_years.max(years);
            }
        }
    }
    max_years
}

/// Degree mentions with their field of study, first-seen order,
/// deduplicated on (degree, lowercased field).
pub fn extract_education(text: &str) -> Vec<EducationRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<(Degree, String)> = HashSet::new();

    for sentence in SENTENCE_SPLIT.split(text) {
        if sentence.trim().is_empty() {
            continue;
        }

        let Some((end, degree)) = DEGREE_PATTERNS
            .iter()
            .find_map(|(pattern, degree)| pattern.find(sentence).map(|m| (m.end(), degree)))
        else {
            continue;
        };

        let field = FIELD_OF_STUDY
            .captures(&sentence[end..])
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        if seen.insert((degree.clone(), field.to_lowercase())) {
            records.push(EducationRecord {
                degree: degree.clone(),
                field,
            });
        }
    }

    debug!("Extracted {} education records", records.len());
    records
}

/// First email, phone, LinkedIn and GitHub matches in the text.
pub fn extract_contacts(text: &str) -> ContactInfo {
    extract_contacts_with_min_digits(text, DEFAULT_MIN_PHONE_DIGITS)
}

/// Like `extract_contacts`, discarding a phone match with fewer than
/// `min_phone_digits` digits.
pub fn extract_contacts_with_min_digits(text: &str, min_phone_digits: usize) -> ContactInfo {
    let phone = first_match(&PHONE, text).filter(|phone| {
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if digits < min_phone_digits {
            debug!("Discarding phone candidate with {} digits", digits);
            false
        } else {
            true
        }
    });

    ContactInfo {
        email: first_match(&EMAIL, text),
        phone,
        linkedin: first_match(&LINKEDIN, text),
        github: first_match(&GITHUB, text),
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

/// Keyword-based section detection; a passing mention counts as present.
pub fn detect_sections(text: &str) -> SectionPresence {
    let (matcher, owners) = &*SECTION_MATCHER;
    let mut presence = SectionPresence::default();
    for m in matcher.find_overlapping_iter(text) {
        presence.mark(owners[m.pattern().as_usize()]);
    }
    presence
}

/// Pick a job title from the first few non-empty lines.
pub fn extract_job_title(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(TITLE_SCAN_LINES)
        .collect();

    let titled = lines.iter().find(|line| {
        let lowered = line.to_lowercase();
        line.split_whitespace().count() < TITLE_MAX_WORDS
            && TITLE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
    });

    titled
        .or_else(|| lines.first())
        .map(|line| line.to_string())
        .unwrap_or_else(|| UNSPECIFIED_TITLE.to_string())
}
