//! Integration tests for the resume analyzer

use resume_analyzer::config::{Config, InputConfig, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{error_json, AnalysisReport, ReportGenerator};
use resume_analyzer::processing::analyzer::ResumeAnalyzer;
use resume_analyzer::processing::entities::Degree;
use resume_analyzer::processing::jd_parser::parse_job_description;
use resume_analyzer::processing::matcher::MatchScorer;
use resume_analyzer::{calculate_match_score, DocumentFormat, ResumeAnalyzerError};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

fn docx_with_lines(lines: &[&str]) -> Vec<u8> {
    let body: String = lines
        .iter()
        .map(|line| {
            format!(
                r#"<w:p><w:r><w:rPr><w:sz w:val="22"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                line
            )
        })
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_resume(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, docx_with_lines(lines)).unwrap();
    path
}

const RESUME_LINES: &[&str] = &[
    "Jane Doe",
    "jane@example.com | 9876543210 | linkedin.com/in/janedoe | github.com/janedoe",
    "Summary",
    "Software engineer with 6 years of experience building APIs.",
    "Skills",
    "• Python, Rust, Docker, PostgreSQL",
    "Education",
    "Master of Science in Computer Science",
];

#[tokio::test]
async fn test_full_pipeline_with_job_description() {
    let dir = tempfile::tempdir().unwrap();
    let resume_path = write_resume(dir.path(), "jane.docx", RESUME_LINES);
    let mut manager = InputManager::new(&InputConfig::default());

    let upload = manager.read_resume(&resume_path).await.unwrap();
    assert_eq!(upload.format, DocumentFormat::Docx);

    let analysis = ResumeAnalyzer::default().analyze(&upload.bytes, upload.format).unwrap();
    assert_eq!(analysis.score, 100);
    assert_eq!(analysis.experience, 6);

    let job_text = manager
        .read_job_description(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let jd = parse_job_description(&job_text);
    assert_eq!(jd.job_title, "Backend Engineer");
    assert_eq!(jd.experience_required, 3);
    assert_eq!(jd.education_required[0].degree, Degree::Master);

    let result = calculate_match_score(&analysis, &jd);
    assert_eq!(result.experience_match, 100.0);
    assert_eq!(result.education_match, 100.0);
    assert_eq!(result.missing_skills, vec!["aws".to_string()]);
    assert!(result.matching_skills.contains(&"python".to_string()));
    assert!(result.matching_skills.contains(&"rust".to_string()));
    assert!(result.overall_score > 65.0);
    assert!(result.overall_score <= 100.0);

    let report = AnalysisReport::with_match(analysis, &jd, result);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["job_description"]["job_title"], "Backend Engineer");
    assert_eq!(value["contacts"]["email"], "jane@example.com");
    assert_eq!(value["jd_analysis"]["missing_skills"][0], "aws");
}

#[tokio::test]
async fn test_configured_scorer_matches_default() {
    let dir = tempfile::tempdir().unwrap();
    let resume_path = write_resume(dir.path(), "jane.docx", RESUME_LINES);
    let config = Config::default();
    let mut manager = InputManager::new(&config.input);

    let upload = manager.read_resume(&resume_path).await.unwrap();
    let analysis = ResumeAnalyzer::new(&config.extraction)
        .analyze(&upload.bytes, upload.format)
        .unwrap();
    let job_text = manager
        .read_job_description(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let jd = parse_job_description(&job_text);

    let configured = MatchScorer::new(config.scoring).score(&analysis, &jd);
    assert_eq!(configured, calculate_match_score(&analysis, &jd));
}

#[tokio::test]
async fn test_markdown_job_description() {
    let mut manager = InputManager::new(&InputConfig::default());
    let text = manager
        .read_job_description(Path::new("tests/fixtures/sample_job.md"))
        .await
        .unwrap();

    assert!(text.starts_with("Backend Engineer"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let jd = parse_job_description(&text);
    assert_eq!(jd.job_title, "Backend Engineer");
    assert_eq!(jd.experience_required, 3);
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new(&InputConfig::default());
    let path = Path::new("tests/fixtures/sample_job.txt");

    let text1 = manager.read_job_description(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.read_job_description(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new(&InputConfig::default()).with_cache(false);
    manager
        .read_job_description(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new(&InputConfig::default());
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let err = manager.read_job_description(path).await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));
    assert!(err.is_fatal_analysis_error());
}

#[tokio::test]
async fn test_resume_must_be_pdf_or_docx() {
    let manager = InputManager::new(&InputConfig::default());
    let path = Path::new("tests/fixtures/sample_job.txt");

    let err = manager.read_resume(path).await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new(&InputConfig::default());
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let err = manager.read_job_description(path).await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::InvalidInput(_)));
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.txt");
    std::fs::write(&path, vec![b'a'; 2 * 1024 * 1024]).unwrap();

    let config = InputConfig {
        max_upload_mb: 1,
        ..InputConfig::default()
    };
    let mut manager = InputManager::new(&config);

    let err = manager.read_job_description(&path).await.unwrap_err();
    assert!(matches!(
        err,
        ResumeAnalyzerError::FileTooLarge { limit_mb: 1, .. }
    ));
}

#[tokio::test]
async fn test_blank_resume_reports_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let resume_path = write_resume(dir.path(), "blank.docx", &["  "]);
    let manager = InputManager::new(&InputConfig::default());

    let upload = manager.read_resume(&resume_path).await.unwrap();
    let err = ResumeAnalyzer::default()
        .analyze(&upload.bytes, upload.format)
        .unwrap_err();
    assert!(err.is_fatal_analysis_error());

    let body: serde_json::Value = serde_json::from_str(&error_json(&err.to_string())).unwrap();
    assert_eq!(body["error"], "Could not extract text from the file.");
}

#[tokio::test]
async fn test_resume_only_console_report() {
    let dir = tempfile::tempdir().unwrap();
    let resume_path = write_resume(dir.path(), "jane.docx", RESUME_LINES);
    let manager = InputManager::new(&InputConfig::default());

    let upload = manager.read_resume(&resume_path).await.unwrap();
    let analysis = ResumeAnalyzer::default().analyze(&upload.bytes, upload.format).unwrap();
    let report = AnalysisReport::resume_only(analysis);
    assert!(!report.has_match());

    let mut output = Config::default().output;
    output.color_output = false;
    let rendered = ReportGenerator::from_config(&output)
        .generate_report(&report, OutputFormat::Console)
        .unwrap();
    assert!(rendered.contains("Formatting Score: 100/100"));

    let json = ReportGenerator::default()
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    assert!(!json.contains("jd_analysis"));
}

#[tokio::test]
async fn test_pdf_resume_against_job_description() {
    let mut manager = InputManager::new(&InputConfig::default());

    let upload = manager
        .read_resume(Path::new("tests/fixtures/resume_winansi.pdf"))
        .await
        .unwrap();
    assert_eq!(upload.format, DocumentFormat::Pdf);

    let analysis = ResumeAnalyzer::default()
        .analyze(&upload.bytes, upload.format)
        .unwrap();
    assert_eq!(analysis.contacts.email.as_deref(), Some("jane@example.com"));
    assert_eq!(analysis.metrics.indentations, 2);
    assert_eq!(analysis.metrics.avg_font_size, 11.0);

    let job_text = manager
        .read_job_description(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let result = calculate_match_score(&analysis, &parse_job_description(&job_text));
    assert!(result.matching_skills.contains(&"python".to_string()));
    assert!(result.matching_skills.contains(&"rust".to_string()));
}

#[test]
fn test_json_error_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let resume_path = write_resume(dir.path(), "blank.docx", &["  "]);
    let config_path = dir.path().join("config.toml");
    let config_toml = toml::to_string_pretty(&Config::default()).unwrap();
    std::fs::write(&config_path, config_toml).unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_resume-analyzer"))
        .arg("--config")
        .arg(&config_path)
        .args(["analyze", "--output", "json", "--resume"])
        .arg(&resume_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["error"], "Could not extract text from the file.");
}
