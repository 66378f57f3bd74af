//! Error handling for the resume analyzer

use thiserror::Error;

/// Errors that can leave the analysis pipeline.
///
/// Only `UnsupportedFormat` and `ExtractionEmpty` are raised by the core
/// analysis functions. Every other failure inside extraction is absorbed
/// there and replaced by empty values. The remaining variants belong to
/// the CLI shell (file reading, configuration, rendering).
#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    /// The payload names what was empty; it is kept out of the message.
    #[error("Could not extract text from the file.")]
    ExtractionEmpty(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File is too large ({size_mb:.1} MB). Maximum size is {limit_mb} MB")]
    FileTooLarge { size_mb: f64, limit_mb: u64 },
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

impl ResumeAnalyzerError {
    /// True for the two failures that halt an analysis before any scoring.
    pub fn is_fatal_analysis_error(&self) -> bool {
        matches!(
            self,
            ResumeAnalyzerError::UnsupportedFormat(_) | ResumeAnalyzerError::ExtractionEmpty(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ResumeAnalyzerError::UnsupportedFormat("xyz".into()).is_fatal_analysis_error());
        let empty = ResumeAnalyzerError::ExtractionEmpty("resume.pdf".into());
        assert!(empty.is_fatal_analysis_error());
        assert!(!ResumeAnalyzerError::InvalidInput("bad".into()).is_fatal_analysis_error());
    }

    #[test]
    fn test_extraction_empty_message() {
        let err = ResumeAnalyzerError::ExtractionEmpty("no text found in docx document".into());
        assert_eq!(err.to_string(), "Could not extract text from the file.");
    }

    #[test]
    fn test_file_too_large_message() {
        let err = ResumeAnalyzerError::FileTooLarge { size_mb: 9.5, limit_mb: 8 };
        assert_eq!(err.to_string(), "File is too large (9.5 MB). Maximum size is 8 MB");
    }
}
