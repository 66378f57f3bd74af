//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_upload_mb: u64,
    pub resume_extensions: Vec<String>,
    pub job_extensions: Vec<String>,
}

/// Switches for the places where the extractors historically diverged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Accept a trailing plural "s" on skill mentions ("dockers" -> "docker").
    pub allow_plural_skills: bool,
    /// Phone matches with fewer digits than this are discarded. 0 disables the check.
    pub min_phone_digits: usize,
}

/// Weights and thresholds of the match scorer. The defaults are the
/// production values; `calculate_match_score` always uses them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub education_weight: f64,
    pub keyword_weight: f64,
    /// Education match (percent) below which the overall score is capped.
    pub education_penalty_threshold: f64,
    pub overall_score_cap: f64,
    /// Minimum partial-ratio (0-100) for a fuzzy field-of-study match.
    pub field_fuzzy_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_upload_mb: 8,
            resume_extensions: vec!["pdf".to_string(), "docx".to_string()],
            job_extensions: vec![
                "txt".to_string(),
                "md".to_string(),
                "pdf".to_string(),
                "docx".to_string(),
            ],
        }
    }
}

impl InputConfig {
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            allow_plural_skills: false,
            min_phone_digits: 10,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.45,
            experience_weight: 0.30,
            education_weight: 0.20,
            keyword_weight: 0.05,
            education_penalty_threshold: 50.0,
            overall_score_cap: 65.0,
            field_fuzzy_threshold: 85.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit config file. Missing sections fall back to defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.input.max_upload_bytes()
    }

    fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        let weights = [
            s.skill_weight,
            s.experience_weight,
            s.education_weight,
            s.keyword_weight,
        ];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(ResumeAnalyzerError::Configuration(
                "Scoring weights must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&s.overall_score_cap) {
            return Err(ResumeAnalyzerError::Configuration(
                "overall_score_cap must be between 0 and 100".to_string(),
            ));
        }
        if self.input.max_upload_mb == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "max_upload_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
