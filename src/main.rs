//! Resume scorer: resume and job description fit scoring tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::error::{Result, ScorerError};
use resume_scorer::input::{FileType, InputManager};
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::output::report::{ReportMetadata, ScoreReport};
use resume_scorer::processing::analyzer::{AnalysisResult, ScoringEngine};
use resume_scorer::processing::document::DocumentText;
use resume_scorer::processing::lint::{LanguageToolClient, LintProvider};
use resume_scorer::processing::similarity::Model2VecProvider;
use resume_scorer::processing::skill_matcher::SkillVocabulary;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        if e.is_warning() {
            println!("⚠️  {}", e);
            process::exit(2);
        }
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            job_text,
            skills,
            skills_file,
            no_feedback,
            detailed,
            output,
            save,
        } => {
            let options = ScoreOptions {
                resume,
                job,
                job_text,
                skills,
                skills_file,
                no_feedback,
                detailed,
                output,
                save,
            };
            run_score(options, config).await
        }

        Commands::Config { action } => run_config(action, config, config_path),
    }
}

struct ScoreOptions {
    resume: PathBuf,
    job: Option<PathBuf>,
    job_text: Option<String>,
    skills: Option<String>,
    skills_file: Option<PathBuf>,
    no_feedback: bool,
    detailed: bool,
    output: Option<String>,
    save: Option<PathBuf>,
}

async fn run_score(options: ScoreOptions, mut config: Config) -> Result<()> {
    info!("Starting resume scoring");
    let start_time = Instant::now();

    cli::validate_file_extension(&options.resume, FileType::RESUME_EXTENSIONS)
        .map_err(|e| ScorerError::InvalidInput(format!("Resume file: {}", e)))?;
    if let Some(job) = &options.job {
        cli::validate_file_extension(job, FileType::JOB_EXTENSIONS)
            .map_err(|e| ScorerError::InvalidInput(format!("Job description file: {}", e)))?;
    }

    let output_format = match &options.output {
        Some(format) => cli::parse_output_format(format).map_err(ScorerError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = options.detailed || config.output.detailed;
    if options.no_feedback {
        config.feedback.enabled = false;
    }

    let vocabulary = cli::load_required_skills(options.skills.as_deref(), options.skills_file.as_deref())?;

    let console = output_format == OutputFormat::Console;
    if console {
        println!("🚀 Resume scoring");
        println!("📄 Resume: {}", options.resume.display());
        match &options.job {
            Some(job) => println!("💼 Job Description: {}", job.display()),
            None => println!("💼 Job Description: inline text"),
        }
        println!("🧩 Skills: {}", vocabulary.len());
        if !config.feedback.enabled {
            println!("⚠️  Feedback disabled");
        }
    }

    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_text(&options.resume).await?;
    let (job_document, job_source) = match (&options.job, &options.job_text) {
        (Some(path), _) => (
            input_manager.extract_text(path).await?,
            path.to_string_lossy().to_string(),
        ),
        (None, Some(text)) => (DocumentText::from_raw(text), "inline text".to_string()),
        (None, None) => {
            return Err(ScorerError::InvalidInput(
                "Provide a job description with --job or --job-text".to_string(),
            ))
        }
    };

    info!(
        "Resume: {} chars, job description: {} chars",
        resume_text.len(),
        job_document.len()
    );

    let spinner = if console { Some(analysis_spinner()) } else { None };

    let outcome = analyze_documents(&config, &resume_text, &job_document, &vocabulary).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let (result, similarity_model) = outcome?;

    let metadata = ReportMetadata::new(
        options.resume.to_string_lossy(),
        job_source,
        similarity_model,
    )
    .with_skills_checked(vocabulary.len())
    .with_processing_time(start_time.elapsed().as_millis() as u64);
    let report = ScoreReport::new(result, metadata);

    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
    let formatted = generator.generate_report(&report, output_format)?;
    println!("{}", formatted);

    if let Some(save_path) = &options.save {
        // Saved files never carry terminal color codes
        let plain = ReportGenerator::with_options(false, detailed, true, true);
        let content = plain.generate_report(&report, output_format)?;
        save_report_to_file(&content, save_path)?;
        if console {
            println!("💾 Report saved to: {}", save_path.display());
        }
    }

    Ok(())
}

/// Wire the configured providers into an engine and score one pair
async fn analyze_documents(
    config: &Config,
    resume: &DocumentText,
    job: &DocumentText,
    vocabulary: &SkillVocabulary,
) -> Result<(AnalysisResult, String)> {
    let similarity = Model2VecProvider::from_config(config)?;
    let linter = if config.feedback.enabled {
        match LanguageToolClient::from_config(&config.feedback) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn LintProvider>),
            Err(e) => {
                warn!("Grammar checking disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let engine = ScoringEngine::from_config(config, Arc::new(similarity), linter);
    let result = engine.analyze(resume, job, vocabulary).await?;
    Ok((result, engine.similarity_model().to_string()))
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn run_config(action: Option<ConfigAction>, mut config: Config, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            println!("⚙️  Current Configuration\n");
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ScorerError::Configuration(format!("Failed to render config: {}", e)))?;
            println!("{}", rendered);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::default().save_to(config_path)?;
            println!("✅ Configuration reset successfully!");
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }

        Some(ConfigAction::Set { key, value }) => {
            config.set(&key, &value)?;
            config.save_to(config_path)?;
            println!("✅ {} = {}", key, value);
        }
    }

    Ok(())
}
