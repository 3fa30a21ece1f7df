//! Report structures wrapping an analysis result for presentation

use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored resume/job pair plus the context it was produced in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Headline score (the Tailoring metric)
    pub overall_score: u8,

    pub verdict: String,

    pub result: AnalysisResult,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    pub scorer_version: String,

    pub resume_file: String,

    /// Job description file path, or "inline text"
    pub job_source: String,

    pub similarity_model: String,

    pub skills_checked: usize,

    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(
        resume_file: impl Into<String>,
        job_source: impl Into<String>,
        similarity_model: impl Into<String>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_source: job_source.into(),
            similarity_model: similarity_model.into(),
            skills_checked: 0,
            processing_time_ms: 0,
        }
    }

    pub fn with_skills_checked(mut self, count: usize) -> Self {
        self.skills_checked = count;
        self
    }

    pub fn with_processing_time(mut self, ms: u64) -> Self {
        self.processing_time_ms = ms;
        self
    }
}

impl ScoreReport {
    pub fn new(result: AnalysisResult, metadata: ReportMetadata) -> Self {
        let overall_score = result.composite_score.overall();
        Self {
            overall_score,
            verdict: verdict(overall_score).to_string(),
            result,
            metadata,
        }
    }
}

pub fn verdict(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent match - strong candidate for this role",
        80..=89 => "Very good match - minor improvements could help",
        70..=79 => "Good match - some targeted improvements recommended",
        60..=69 => "Fair match - several improvements needed",
        50..=59 => "Below average match - significant improvements required",
        _ => "Poor match - major revisions needed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_bands() {
        assert!(verdict(100).starts_with("Excellent"));
        assert!(verdict(85).starts_with("Very good"));
        assert!(verdict(60).starts_with("Fair"));
        assert!(verdict(12).starts_with("Poor"));
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = ReportMetadata::new("cv.pdf", "inline text", "potion-base-8M")
            .with_skills_checked(4)
            .with_processing_time(120);

        assert_eq!(metadata.resume_file, "cv.pdf");
        assert_eq!(metadata.skills_checked, 4);
        assert_eq!(metadata.processing_time_ms, 120);
        assert_eq!(metadata.scorer_version, env!("CARGO_PKG_VERSION"));
    }
}
