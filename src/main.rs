//! Resume analyzer: formatting checks and job description matching

use clap::Parser;
use log::{debug, error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename};
use resume_analyzer::output::{error_json, AnalysisReport, ReportGenerator};
use resume_analyzer::processing::analyzer::ResumeAnalyzer;
use resume_analyzer::processing::jd_parser::parse_job_description_with;
use resume_analyzer::processing::matcher::MatchScorer;
use resume_analyzer::processing::skills::SkillExtractor;
use resume_analyzer::{Result, ResumeAnalyzerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?
                }
                None => config.output.format,
            };

            match run_analysis(&config, &resume, job.as_deref()).await {
                Ok(report) => {
                    let mut output_config = config.output.clone();
                    output_config.detailed |= detailed;
                    let generator = ReportGenerator::from_config(&output_config);
                    let rendered = generator.generate_report(&report, output_format)?;
                    println!("{}", rendered);

                    if let Some(save_path) = save {
                        let target = resolve_save_path(save_path, output_format, &resume);
                        // Saved reports never carry terminal color codes.
                        let plain = if output_format == OutputFormat::Console {
                            output_config.color_output = false;
                            ReportGenerator::from_config(&output_config)
                                .generate_report(&report, output_format)?
                        } else {
                            rendered
                        };
                        save_report_to_file(&plain, &target)?;
                        info!("Report saved to {}", target.display());
                    }
                }
                Err(e) if e.is_fatal_analysis_error() && output_format == OutputFormat::Json => {
                    debug!("Analysis stopped: {:?}", e);
                    println!("{}", error_json(&e.to_string()));
                    process::exit(1);
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults: {}", Config::config_path().display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },

        Commands::Health => {
            println!("{} {}: ok", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Resume analysis, plus the job match when a job description was given.
async fn run_analysis(
    config: &Config,
    resume: &Path,
    job: Option<&Path>,
) -> Result<AnalysisReport> {
    let mut input_manager = InputManager::new(&config.input);

    info!("Analyzing resume: {}", resume.display());
    let upload = input_manager.read_resume(resume).await?;
    let analysis = ResumeAnalyzer::new(&config.extraction).analyze(&upload.bytes, upload.format)?;

    let Some(job) = job else {
        return Ok(AnalysisReport::resume_only(analysis));
    };

    info!("Matching against job description: {}", job.display());
    let job_text = input_manager.read_job_description(job).await?;
    let extractor = SkillExtractor::for_policy(config.extraction.allow_plural_skills);
    let jd = parse_job_description_with(&job_text, extractor);
    let result = MatchScorer::new(config.scoring).score(&analysis, &jd);

    Ok(AnalysisReport::with_match(analysis, &jd, result))
}

/// A directory target gets a generated file name inside it.
fn resolve_save_path(save_path: PathBuf, format: OutputFormat, resume: &Path) -> PathBuf {
    if save_path.is_dir() {
        let resume_name = resume.to_string_lossy();
        save_path.join(suggest_filename(format, &resume_name, true))
    } else {
        save_path
    }
}
