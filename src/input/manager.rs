//! Input manager: reads uploads from disk and enforces upload rules

use crate::config::InputConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::extract_text;
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file accepted for analysis.
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

pub struct InputManager {
    config: InputConfig,
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            config: config.clone(),
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a resume. Only the configured resume extensions are accepted.
    pub async fn read_resume(&self, path: &Path) -> Result<Upload> {
        let upload = self.read_upload(path, &self.config.resume_extensions).await?;
        if !upload.format.supports_layout() {
            return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "{} (upload PDF or DOCX)",
                upload.format
            )));
        }
        Ok(upload)
    }

    /// Read a job description and decode it to plain text.
    pub async fn read_job_description(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let upload = self.read_upload(path, &self.config.job_extensions).await?;
        info!("Extracting {} job description: {}", upload.format, path.display());
        let text = extract_text(&upload.bytes, upload.format)?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    async fn read_upload(&self, path: &Path, allowed: &[String]) -> Result<Upload> {
        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                ResumeAnalyzerError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        let format = allowed
            .iter()
            .any(|allowed_ext| allowed_ext.eq_ignore_ascii_case(&extension))
            .then(|| DocumentFormat::from_extension(&extension))
            .flatten()
            .ok_or_else(|| {
                ResumeAnalyzerError::UnsupportedFormat(format!(
                    "'{}'. Please upload one of: {}",
                    extension,
                    allowed.join(", ")
                ))
            })?;

        let size = fs::metadata(path).await?.len();
        if size > self.config.max_upload_bytes() {
            return Err(ResumeAnalyzerError::FileTooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                limit_mb: self.config.max_upload_mb,
            });
        }

        let bytes = fs::read(path).await?;
        info!("Read {} ({} bytes, {})", path.display(), bytes.len(), format);

        Ok(Upload {
            path: path.to_path_buf(),
            format,
            bytes,
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
