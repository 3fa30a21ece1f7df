//! Resume scorer library
//!
//! Scores how well a resume fits a job description: semantic similarity,
//! skill coverage, section presence and layout, plus recommendations.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ScorerError};
pub use processing::analyzer::{AnalysisResult, Feedback, ScoringEngine};
pub use processing::document::{DocumentText, NormalizedText};
pub use processing::skill_matcher::SkillVocabulary;
