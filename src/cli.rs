//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use crate::error::{Result, ScorerError};
use crate::processing::skill_matcher::SkillVocabulary;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score a resume against a job description")]
#[command(long_about = "Score resume fit for a job description using semantic similarity, skill matching, section detection and layout checks")]
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
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description pasted as text
        #[arg(long)]
        job_text: Option<String>,

        /// Comma separated skills, e.g. "python, sql, docker"
        #[arg(short, long)]
        skills: Option<String>,

        /// File with one skill per line (commas also accepted)
        #[arg(long, conflicts_with = "skills")]
        skills_file: Option<PathBuf>,

        /// Skip grammar and formatting feedback
        #[arg(long)]
        no_feedback: bool,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.thresholds.style")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> std::result::Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Build the skill vocabulary from `--skills` or `--skills-file`.
/// Neither flag yields an empty vocabulary, which the scorer rejects
/// with guidance.
pub fn load_skills(skills: Option<&str>, skills_file: Option<&Path>) -> Result<SkillVocabulary> {
    if let Some(path) = skills_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScorerError::InvalidInput(format!("Cannot read skills file {}: {}", path.display(), e))
        })?;
        return Ok(SkillVocabulary::parse(&content));
    }

    Ok(skills.map(SkillVocabulary::parse).unwrap_or_default())
}

/// Like [`load_skills`], but an empty vocabulary is rejected up front so
/// no document is read and no model is loaded for a run that cannot score
pub fn load_required_skills(skills: Option<&str>, skills_file: Option<&Path>) -> Result<SkillVocabulary> {
    let vocabulary = load_skills(skills, skills_file)?;
    vocabulary.validate()?;
    Ok(vocabulary)
}
