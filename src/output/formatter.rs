//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::{Result, ScorerError};
use crate::output::report::ScoreReport;
use crate::processing::analyzer::Feedback;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a score report
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

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
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
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

    fn format_list(&self, items: &[String], color: Color, empty: &str) -> String {
        if items.is_empty() {
            return format!("  {}\n", self.colorize(empty, Color::BrightBlack));
        }
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }

    fn format_feedback(&self, feedback: &Feedback) -> String {
        let mut output = self.format_header("📝 Resume Feedback", 2);

        output.push_str(&self.format_header("Grammar & Spelling", 3));
        match &feedback.grammar_issues {
            Some(issues) if issues.is_empty() => output.push_str("  No grammar issues found.\n"),
            Some(issues) => {
                for issue in issues {
                    output.push_str(&format!("  • {}\n", self.colorize(&issue.to_string(), Color::Yellow)));
                }
            }
            None => output.push_str(&format!(
                "  {}\n",
                self.colorize("Grammar check unavailable", Color::BrightBlack)
            )),
        }

        output.push_str(&self.format_header("Formatting", 3));
        output.push_str(&self.format_list(
            &feedback.formatting_issues,
            Color::Yellow,
            "Formatting looks good.",
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME SCORE REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall", 2));
        output.push_str(&format!(
            "Resume Score: {}% {}\n",
            report.overall_score,
            self.format_score_badge(report.overall_score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (metric, score) in result.composite_score.iter() {
            output.push_str(&format!(
                "  {:<26} {:>3}% {}\n",
                metric.label(),
                score,
                self.format_score_badge(score)
            ));
        }

        output.push_str(&self.format_header("✅ Matched Skills", 2));
        output.push_str(&self.format_list(&result.skill_match.matched_skills, Color::Green, "None"));

        output.push_str(&self.format_header("❌ Missing Skills", 2));
        output.push_str(&self.format_list(&result.skill_match.missing_skills, Color::Red, "None"));

        if self.detailed && !result.near_misses.is_empty() {
            output.push_str(&self.format_header("Possible Spelling Variants", 3));
            for near_miss in &result.near_misses {
                output.push_str(&format!(
                    "  • '{}' looks like '{}' ({:.0}% similar)\n",
                    near_miss.found,
                    near_miss.skill,
                    near_miss.similarity * 100.0
                ));
            }
        }

        output.push_str(&self.format_header("📑 Sections", 2));
        let found: Vec<String> = result.section_report.found_sections.iter().map(|s| s.to_string()).collect();
        output.push_str(&format!("  Found ({}%): {}\n", result.section_report.presence_ratio, join_or_none(&found)));
        let missing = result.section_report.missing_names();
        output.push_str(&format!(
            "  Missing: {}\n",
            self.colorize(&join_or_none(&missing), Color::Red)
        ));

        if let Some(feedback) = &result.feedback {
            output.push_str(&self.format_feedback(feedback));
        }

        output.push_str(&self.format_header("📋 Recommendations", 2));
        for (i, recommendation) in result.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }

        if self.detailed {
            output.push_str(&self.format_header("Analysis Details", 3));
            output.push_str(&format!("  Resume: {}\n", report.metadata.resume_file));
            output.push_str(&format!("  Job description: {}\n", report.metadata.job_source));
            output.push_str(&format!("  Skills checked: {}\n", report.metadata.skills_checked));
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Scorer v{} | Similarity model: {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scorer_version,
            report.metadata.similarity_model
        ));

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
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
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

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n\n".to_string();
        }
        let mut output: String = items.iter().map(|item| format!("- {}\n", item)).collect();
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Score Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                resume_name, report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Resume Score:** {}% {}\n\n",
            report.overall_score,
            Self::markdown_score_badge(report.overall_score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Metric | Score |\n");
        output.push_str("|--------|-------|\n");
        for (metric, score) in result.composite_score.iter() {
            output.push_str(&format!("| {} | {}% |\n", metric.label(), score));
        }
        output.push('\n');

        output.push_str("## Skills\n\n### ✅ Matched\n\n");
        output.push_str(&Self::bullet_list(&result.skill_match.matched_skills));
        output.push_str("### ❌ Missing\n\n");
        output.push_str(&Self::bullet_list(&result.skill_match.missing_skills));

        if !result.near_misses.is_empty() {
            output.push_str("### Possible Spelling Variants\n\n");
            for near_miss in &result.near_misses {
                output.push_str(&format!(
                    "- `{}` looks like `{}` ({:.0}% similar)\n",
                    near_miss.found,
                    near_miss.skill,
                    near_miss.similarity * 100.0
                ));
            }
            output.push('\n');
        }

        output.push_str("## Sections\n\n");
        output.push_str(&format!(
            "**Presence:** {}%\n\n",
            result.section_report.presence_ratio
        ));
        output.push_str("**Missing:**\n\n");
        output.push_str(&Self::bullet_list(&result.section_report.missing_names()));

        if let Some(feedback) = &result.feedback {
            output.push_str("## Feedback\n\n### Grammar & Spelling\n\n");
            match &feedback.grammar_issues {
                Some(issues) => {
                    let rendered: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                    output.push_str(&Self::bullet_list(&rendered));
                }
                None => output.push_str("_Grammar check unavailable_\n\n"),
            }
            output.push_str("### Formatting\n\n");
            output.push_str(&Self::bullet_list(&feedback.formatting_issues));
        }

        output.push_str("## 📋 Recommendations\n\n");
        for (i, recommendation) in result.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }

        output.push_str(&format!(
            "\n---\n\n*Generated by Resume Scorer v{} using {}*\n",
            report.metadata.scorer_version, report.metadata.similarity_model
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
            ],
        }
    }

    /// Register a formatter; it takes precedence over earlier ones for its format
    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter>) -> Self {
        self.formatters.insert(0, formatter);
        self
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        let formatter = self
            .formatters
            .iter()
            .find(|formatter| formatter.supports_format() == format)
            .ok_or_else(|| ScorerError::OutputFormatting(format!("No formatter for {:?} output", format)))?;
        formatter.format_report(report)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
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

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_score{}.{}", base_name, timestamp_suffix, extension)
}
