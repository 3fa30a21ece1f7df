//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Provider failure: {0}")]
    ProviderFailure(String),

    #[error("{0}")]
    ValidationWarning(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ScorerError {
    /// Warnings ask the user for more input; they are not failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, ScorerError::ValidationWarning(_))
    }
}

pub type Result<T> = std::result::Result<T, ScorerError>;

/// Embedding backends report through anyhow
impl From<anyhow::Error> for ScorerError {
    fn from(err: anyhow::Error) -> Self {
        ScorerError::ProviderFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_is_a_warning() {
        assert!(ScorerError::ValidationWarning("add skills".into()).is_warning());
        assert!(!ScorerError::EmptyInput("resume".into()).is_warning());
        assert!(!ScorerError::ProviderFailure("down".into()).is_warning());
    }

    #[test]
    fn test_anyhow_maps_to_provider_failure() {
        let err: ScorerError = anyhow::anyhow!("model missing").into();
        assert!(matches!(err, ScorerError::ProviderFailure(ref m) if m == "model missing"));
    }
}
