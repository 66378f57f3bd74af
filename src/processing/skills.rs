//! Skill taxonomy and dictionary-based skill extraction

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Frameworks,
    Databases,
    Cloud,
    Tools,
    Methodologies,
    SoftSkills,
}

/// Category -> sorted set of canonical skills found in one text.
pub type ExtractedSkills = BTreeMap<SkillCategory, BTreeSet<String>>;

const PROGRAMMING: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin", "go",
    "rust", "typescript", "html", "css", "sql", "r", "matlab", "scala", "perl", "bash",
    "shell", "powershell", "dart", "objective-c", "assembly", "fortran", "cobol", "lua",
];

const FRAMEWORKS: &[&str] = &[
    "django", "flask", "spring", "angular", "vue", "express", "laravel", "rails",
    "asp.net", "tensorflow", "pytorch", "keras", "node.js", "react", "react native",
    "flutter", "jquery", "bootstrap", "ember", "backbone", "meteor", "svelte", "next.js",
    "nuxt.js", "nestjs", "fastapi", "graphql", "hibernate", "mybatis", "jpa",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "mongodb", "redis", "oracle", "sql server", "cassandra",
    "elasticsearch", "dynamodb", "firebase", "cosmosdb", "sqlite", "mariadb", "couchdb",
    "neo4j", "arangodb", "rethinkdb", "couchbase", "memcached", "hbase", "bigtable",
];

const CLOUD: &[&str] = &[
    "aws", "azure", "google cloud", "docker", "kubernetes", "terraform", "ansible",
    "jenkins", "ci/cd", "serverless", "lambda", "ec2", "s3", "azure functions",
    "google functions", "cloud formation", "cloudwatch", "azure devops", "github actions",
    "circleci", "gitlab ci", "travis ci", "heroku", "digital ocean", "linode", "vultr",
];

const TOOLS: &[&str] = &[
    "git", "github", "gitlab", "jira", "confluence", "slack", "trello", "jenkins",
    "circleci", "github actions", "docker", "kubernetes", "postman", "swagger",
    "visual studio", "intellij", "eclipse", "vs code", "android studio", "xcode",
    "webstorm", "pycharm", "phpstorm", "rubymine", "sublime", "atom", "notepad++",
];

const METHODOLOGIES: &[&str] = &[
    "agile", "scrum", "kanban", "waterfall", "devops", "ci/cd", "tdd", "bdd",
    "pair programming", "code review", "version control", "microservices", "monolith",
    "rest", "soap", "graphql", "grpc", "oauth", "jwt", "openid", "saml",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "critical thinking",
    "adaptability", "time management", "creativity", "collaboration", "presentation",
    "mentoring", "coaching", "negotiation", "conflict resolution", "decision making",
    "strategic thinking", "analytical skills", "attention to detail", "multitasking",
];

static TAXONOMY: LazyLock<SkillTaxonomy> = LazyLock::new(SkillTaxonomy::builtin);

static STRICT_EXTRACTOR: LazyLock<SkillExtractor> =
    LazyLock::new(|| SkillExtractor::new(SkillTaxonomy::global(), false));

static PLURAL_EXTRACTOR: LazyLock<SkillExtractor> =
    LazyLock::new(|| SkillExtractor::new(SkillTaxonomy::global(), true));

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Programming,
        SkillCategory::Frameworks,
        SkillCategory::Databases,
        SkillCategory::Cloud,
        SkillCategory::Tools,
        SkillCategory::Methodologies,
        SkillCategory::SoftSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Databases => "databases",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Tools => "tools",
            SkillCategory::Methodologies => "methodologies",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The static skill dictionary, immutable once built.
///
/// A handful of skills are listed under more than one category ("docker"
/// is both cloud and tools). Ownership is resolved in registration order:
/// the category registered last wins, so `category_of("docker")` is
/// `Tools`. `categories_containing` still reports every listing.
#[derive(Debug)]
pub struct SkillTaxonomy {
    categories: Vec<(SkillCategory, &'static [&'static str])>,
    owner: HashMap<&'static str, SkillCategory>,
}

impl SkillTaxonomy {
    pub fn global() -> &'static SkillTaxonomy {
        &TAXONOMY
    }

    fn builtin() -> Self {
        Self::from_categories(vec![
            (SkillCategory::Programming, PROGRAMMING),
            (SkillCategory::Frameworks, FRAMEWORKS),
            (SkillCategory::Databases, DATABASES),
            (SkillCategory::Cloud, CLOUD),
            (SkillCategory::Tools, TOOLS),
            (SkillCategory::Methodologies, METHODOLOGIES),
            (SkillCategory::SoftSkills, SOFT_SKILLS),
        ])
    }

    fn from_categories(categories: Vec<(SkillCategory, &'static [&'static str])>) -> Self {
        let mut owner = HashMap::new();
        for (category, skills) in &categories {
            for skill in skills.iter() {
                owner.insert(*skill, *category);
            }
        }
        Self { categories, owner }
    }

    /// The single category a skill is filed under, if it is known.
    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.owner.get(skill).copied()
    }

    pub fn categories_containing(&self, skill: &str) -> Vec<SkillCategory> {
        self.categories
            .iter()
            .filter(|(_, skills)| skills.contains(&skill))
            .map(|(category, _)| *category)
            .collect()
    }

    pub fn skills(&self, category: SkillCategory) -> &'static [&'static str] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, skills)| *skills)
            .unwrap_or(&[])
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.owner.contains_key(skill)
    }

    /// Number of distinct canonical skills.
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Distinct skills, longest first so multi-word skills win over their prefixes.
    fn skills_longest_first(&self) -> Vec<&'static str> {
        let mut skills: Vec<&'static str> = Vec::with_capacity(self.owner.len());
        for (_, listed) in &self.categories {
            for skill in listed.iter() {
                if !skills.contains(skill) {
                    skills.push(skill);
                }
            }
        }
        skills.sort_by(|a, b| b.len().cmp(&a.len()));
        skills
    }
}

/// Single-pass matcher over the whole taxonomy.
pub struct SkillExtractor {
    taxonomy: &'static SkillTaxonomy,
    pattern: Regex,
    allow_plural: bool,
}

impl SkillExtractor {
    pub fn new(taxonomy: &'static SkillTaxonomy, allow_plural: bool) -> Self {
        let alternation = taxonomy
            .skills_longest_first()
            .iter()
            .map(|skill| regex::escape(skill))
            .collect::<Vec<_>>()
            .join("|");
        let plural = if allow_plural { "s?" } else { "" };
        let pattern = Regex::new(&format!(r"(?i)\b(?:{}){}\b", alternation, plural))
            .expect("Skill taxonomy produced an invalid pattern");

        Self {
            taxonomy,
            pattern,
            allow_plural,
        }
    }

    /// Shared strict extractor built from the global taxonomy.
    pub fn global() -> &'static SkillExtractor {
        &STRICT_EXTRACTOR
    }

    /// Shared extractor for the given plural policy.
    pub fn for_policy(allow_plural: bool) -> &'static SkillExtractor {
        if allow_plural {
            &PLURAL_EXTRACTOR
        } else {
            &STRICT_EXTRACTOR
        }
    }

    pub fn extract(&self, text: &str) -> ExtractedSkills {
        let mut found = ExtractedSkills::new();
        if text.trim().is_empty() {
            return found;
        }

        for m in self.pattern.find_iter(text) {
            let skill = self.canonicalize(&m.as_str().to_lowercase());
            if let Some(category) = self.taxonomy.category_of(&skill) {
                found.entry(category).or_default().insert(skill);
            }
        }

        debug!(
            "Extracted {} skills across {} categories",
            found.values().map(BTreeSet::len).sum::<usize>(),
            found.len()
        );
        found
    }

    fn canonicalize(&self, matched: &str) -> String {
        if self.allow_plural && !self.taxonomy.contains(matched) {
            if let Some(singular) = matched.strip_suffix('s') {
                if self.taxonomy.contains(singular) {
                    return singular.to_string();
                }
            }
        }
        matched.to_string()
    }
}

/// Extract skills with the shared strict extractor.
pub fn extract_skills(text: &str) -> ExtractedSkills {
    SkillExtractor::global().extract(text)
}

/// All skills across categories, deduplicated and sorted.
pub fn flatten_skills(skills: &ExtractedSkills) -> Vec<String> {
    skills
        .values()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
