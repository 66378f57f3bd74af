//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Resume formatting checks and job description matching")]
#[command(long_about = "Extract structure, contacts, education, experience and skills from a PDF or DOCX resume, score its formatting, and optionally score it against a job description")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume, optionally against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF, DOCX)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the extracted text and per-pair education scores
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Print service name and version
    Health,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "resume-analyzer",
            "--verbose",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "role.txt",
            "--output",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { resume, job, output, save, detailed } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job, Some(PathBuf::from("role.txt")));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(save.is_none());
                assert!(!detailed);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_config_and_health_commands() {
        let cli = Cli::try_parse_from(["resume-analyzer", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: Some(ConfigAction::Path) }));

        let cli = Cli::try_parse_from(["resume-analyzer", "health"]).unwrap();
        assert!(matches!(cli.command, Commands::Health));
    }
}
