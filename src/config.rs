//! Configuration management for the resume scorer

use crate::error::{Result, ScorerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub similarity: SimilarityConfig,
    pub scoring: ScoringConfig,
    pub feedback: FeedbackConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// HuggingFace repo id, or a directory name under `models_dir`
    pub model: String,
    pub models_dir: PathBuf,
    pub timeout_secs: u64,
    pub resume_prefix: String,
    pub job_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub match_mode: MatchMode,
    pub style_strategy: StyleStrategyKind,
    pub fixed_style: u8,
    pub fixed_ats: u8,
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Substring,
    WordBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleStrategyKind {
    Fixed,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub tailoring: u8,
    pub content: u8,
    pub style: u8,
    pub ats: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub enabled: bool,
    pub languagetool_url: String,
    pub language: String,
    pub max_grammar_issues: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-scorer")
            .join("models");

        Self {
            model: "minishlab/potion-base-8M".to_string(),
            models_dir,
            timeout_secs: 30,
            resume_prefix: String::new(),
            job_prefix: String::new(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            style_strategy: StyleStrategyKind::Heuristic,
            fixed_style: 86,
            fixed_ats: 100,
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tailoring: 60,
            content: 60,
            style: 70,
            ats: 80,
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languagetool_url: "http://localhost:8081".to_string(),
            language: "en-US".to_string(),
            max_grammar_issues: 10,
            timeout_secs: 15,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    /// Update a scalar setting addressed by a dotted key such as
    /// `scoring.thresholds.style`. The new value must parse as the type
    /// already stored under that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut root = toml::Value::try_from(&*self)
            .map_err(|e| ScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let mut slot = &mut root;
        for part in key.split('.') {
            slot = slot
                .get_mut(part)
                .ok_or_else(|| ScorerError::Configuration(format!("Unknown configuration key: {}", key)))?;
        }

        let invalid = |kind: &str| {
            ScorerError::Configuration(format!("Value '{}' for {} is not a valid {}", value, key, kind))
        };

        let updated = match &*slot {
            toml::Value::String(_) => toml::Value::String(value.to_string()),
            toml::Value::Integer(_) => {
                toml::Value::Integer(value.parse::<i64>().map_err(|_| invalid("integer"))?)
            }
            toml::Value::Float(_) => {
                toml::Value::Float(value.parse::<f64>().map_err(|_| invalid("number"))?)
            }
            toml::Value::Boolean(_) => {
                toml::Value::Boolean(value.parse::<bool>().map_err(|_| invalid("boolean"))?)
            }
            _ => {
                return Err(ScorerError::Configuration(format!(
                    "{} is a table, not a single setting",
                    key
                )))
            }
        };
        *slot = updated;

        *self = root
            .try_into()
            .map_err(|e| ScorerError::Configuration(format!("Invalid value for {}: {}", key, e)))?;
        Ok(())
    }

    /// Resolve the embedding model location: a downloaded copy under
    /// `models_dir` wins, otherwise the id is handed to the hub loader.
    pub fn similarity_model_path(&self) -> PathBuf {
        let local_path = self.similarity.models_dir.join(&self.similarity.model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.similarity.model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = Config::default();
        assert_eq!(config.scoring.match_mode, MatchMode::Substring);
        assert_eq!(config.scoring.fixed_style, 86);
        assert_eq!(config.scoring.fixed_ats, 100);
        assert_eq!(config.scoring.thresholds.tailoring, 60);
        assert_eq!(config.scoring.thresholds.ats, 80);
        assert!(config.feedback.enabled);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[scoring]\nmatch_mode = \"word_boundary\"\n").unwrap();
        assert_eq!(config.scoring.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.scoring.thresholds.style, 70);
        assert_eq!(config.feedback.language, "en-US");
    }

    #[test]
    fn test_set_updates_nested_values() {
        let mut config = Config::default();
        config.set("scoring.thresholds.style", "55").unwrap();
        config.set("feedback.enabled", "false").unwrap();
        config.set("scoring.match_mode", "word_boundary").unwrap();

        assert_eq!(config.scoring.thresholds.style, 55);
        assert!(!config.feedback.enabled);
        assert_eq!(config.scoring.match_mode, MatchMode::WordBoundary);
    }

    #[test]
    fn test_set_rejects_unknown_and_mistyped_keys() {
        let mut config = Config::default();
        assert!(config.set("scoring.nope", "1").is_err());
        assert!(config.set("feedback.enabled", "maybe").is_err());
        assert!(config.set("scoring.thresholds.style", "300").is_err());
        assert!(config.set("scoring", "1").is_err());
        assert!(config.set("scoring.match_mode", "fuzzy").is_err());
    }
}
