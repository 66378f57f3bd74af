//! Output formatters for analysis reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::entities::Section;
use crate::processing::matcher::MatchResult;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

const ALL_SECTIONS: [Section; 6] = [
    Section::Summary,
    Section::Education,
    Section::Experience,
    Section::Skills,
    Section::Certificates,
    Section::Projects,
];

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_flag(&self, present: bool) -> String {
        match (present, self.use_colors) {
            (true, true) => "✓".green().to_string(),
            (false, true) => "✗".red().to_string(),
            (true, false) => "[x]".to_string(),
            (false, false) => "[ ]".to_string(),
        }
    }

    fn format_list(items: &[String]) -> String {
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    }

    fn format_match(&self, output: &mut String, report: &AnalysisReport, result: &MatchResult) {
        output.push_str(&self.format_header("Job Match", 2));
        if let Some(jd) = &report.job_description {
            output.push_str(&format!("Position: {}\n", self.colorize(&jd.job_title, Color::Cyan)));
            output.push_str(&format!("Required experience: {} years\n", jd.required_experience));
        }

        let overall = result.overall_score.round().clamp(0.0, 100.0) as u8;
        output.push_str(&format!(
            "Overall Match: {:.1}% {}\n",
            result.overall_score,
            self.format_score_badge(overall)
        ));
        output.push_str(&format!("  Skills:     {:.1}%\n", result.skill_match));
        output.push_str(&format!("  Experience: {:.1}%\n", result.experience_match));
        output.push_str(&format!("  Education:  {:.1}%\n", result.education_match));
        output.push_str(&format!("  Keywords:   {:.1}%\n", result.keyword_match));

        output.push_str(&format!(
            "Matching skills: {}\n",
            self.colorize(&Self::format_list(&result.matching_skills), Color::Green)
        ));
        output.push_str(&format!(
            "Missing skills:  {}\n",
            self.colorize(&Self::format_list(&result.missing_skills), Color::Red)
        ));

        if self.detailed && !result.education_details.matches.is_empty() {
            output.push_str(&self.format_header("Education Comparison", 3));
            for pair in &result.education_details.matches {
                output.push_str(&format!(
                    "  {} {} vs required {} {}: degree {:.2} x field {:.2} = {:.2}\n",
                    pair.resume_degree,
                    pair.resume_field,
                    pair.jd_degree,
                    pair.jd_field,
                    pair.degree_score,
                    pair.field_score,
                    pair.combined_score
                ));
            }
            output.push_str(&format!(
                "  Best match: {:.2}\n",
                result.education_details.best_match_score
            ));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let resume = &report.resume;
        let metrics = &resume.metrics;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Formatting", 2));
        output.push_str(&format!(
            "Formatting Score: {}/100 {}\n",
            resume.score,
            self.format_score_badge(resume.score)
        ));
        output.push_str(&format!(
            "Font size: {:.1}pt | Line spacing: {:.2} | Indented lines: {} | Blank lines: {}\n",
            metrics.avg_font_size,
            metrics.avg_line_spacing,
            metrics.indentations,
            metrics.blank_lines
        ));
        output.push_str(&format!("Words: {} | Pages: {}\n", metrics.words, metrics.pages));

        let sections: Vec<String> = ALL_SECTIONS
            .iter()
            .map(|section| {
                format!(
                    "{} {}",
                    self.format_flag(metrics.sections_found.is_present(*section)),
                    section.as_str()
                )
            })
            .collect();
        output.push_str(&format!("Sections: {}\n", sections.join("  ")));

        output.push_str(&self.format_header("Contact Details", 3));
        let contacts = [
            ("Email", &resume.contacts.email),
            ("Phone", &resume.contacts.phone),
            ("LinkedIn", &resume.contacts.linkedin),
            ("GitHub", &resume.contacts.github),
        ];
        for (label, value) in contacts {
            let shown = match value {
                Some(value) => value.clone(),
                None => self.colorize("not found", Color::Red),
            };
            output.push_str(&format!("  {}: {}\n", label, shown));
        }

        if !resume.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions", 3));
            for (i, suggestion) in resume.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output.push_str(&self.format_header("Profile", 2));
        output.push_str(&format!("Experience: {} years\n", resume.experience));
        for record in &resume.education {
            if record.field.is_empty() {
                output.push_str(&format!("Education: {}\n", record.degree));
            } else {
                output.push_str(&format!("Education: {} in {}\n", record.degree, record.field));
            }
        }

        let skill_count: usize = resume.skills.values().map(|skills| skills.len()).sum();
        output.push_str(&format!("Skills found: {}\n", skill_count));
        if self.detailed {
            for (category, skills) in &resume.skills {
                let listed: Vec<&str> = skills.iter().map(String::as_str).collect();
                output.push_str(&format!("  {}: {}\n", category, listed.join(", ")));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Extracted Text", 3));
            for line in resume.full_text.lines() {
                output.push_str(&format!("  {}\n", line));
            }
        }

        if let Some(result) = &report.jd_analysis {
            self.format_match(&mut output, report, result);
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
    }
}
