//! Resume analyzer library
//!
//! Extracts layout metrics, contacts, sections, education, experience and
//! skills from PDF/DOCX resumes, scores their formatting, and scores a
//! resume against a parsed job description.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use input::file_detector::DocumentFormat;
pub use processing::analyzer::{analyze_resume, ResumeAnalysis};
pub use processing::jd_parser::{parse_job_description, JobDescriptionAnalysis};
pub use processing::matcher::{calculate_match_score, MatchResult};
