//! Document format detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Markdown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" | "text" => Some(DocumentFormat::PlainText),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }

    /// Accepts MIME types as sent by upload forms as well as the short
    /// tags `pdf`, `docx`, `plain-text`.
    pub fn from_declared(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        let essence = tag.split(';').next().unwrap_or("").trim();
        match essence {
            "application/pdf" => Some(DocumentFormat::Pdf),
            DOCX_MIME => Some(DocumentFormat::Docx),
            "text/plain" | "plain-text" => Some(DocumentFormat::PlainText),
            "text/markdown" => Some(DocumentFormat::Markdown),
            other => Self::from_extension(other),
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Formats that carry layout information and can be scored as a resume.
    pub fn supports_layout(&self) -> bool {
        matches!(self, DocumentFormat::Pdf | DocumentFormat::Docx)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::PlainText => write!(f, "plain-text"),
            DocumentFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_formats() {
        assert_eq!(DocumentFormat::from_declared("application/pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_declared(DOCX_MIME), Some(DocumentFormat::Docx));
        assert_eq!(
            DocumentFormat::from_declared("text/plain; charset=utf-8"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_declared("plain-text"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_declared("DOCX"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_declared("image/png"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("cv.PDF")), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_path(Path::new("job.md")), Some(DocumentFormat::Markdown));
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_layout_support() {
        assert!(DocumentFormat::Pdf.supports_layout());
        assert!(DocumentFormat::Docx.supports_layout());
        assert!(!DocumentFormat::PlainText.supports_layout());
    }
}
