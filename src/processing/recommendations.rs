//! Threshold driven recommendations

use crate::config::ThresholdConfig;
use crate::processing::scoring::CompositeScore;

pub const WELL_PREPARED: &str = "Resume looks well-prepared.";

/// Score thresholds below which a recommendation fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationRules {
    pub tailoring: u8,
    pub content: u8,
    pub style: u8,
    pub ats: u8,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self::from(&ThresholdConfig::default())
    }
}

impl From<&ThresholdConfig> for RecommendationRules {
    fn from(thresholds: &ThresholdConfig) -> Self {
        Self {
            tailoring: thresholds.tailoring,
            content: thresholds.content,
            style: thresholds.style,
            ats: thresholds.ats,
        }
    }
}

impl RecommendationRules {
    /// Evaluate every rule in priority order; each adds at most one message.
    /// When none fires the resume gets the single "well-prepared" message.
    pub fn recommend<S, T>(
        &self,
        scores: &CompositeScore,
        missing_skills: &[S],
        missing_sections: &[T],
    ) -> Vec<String>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut recommendations = Vec::new();

        if scores.tailoring < self.tailoring {
            recommendations.push("Improve keyword matching with the job description.".to_string());
        }
        if scores.content < self.content {
            recommendations.push("Better align content with job responsibilities.".to_string());
        }
        if !missing_skills.is_empty() {
            recommendations.push(format!("Add these missing skills: {}.", join(missing_skills)));
        }
        if scores.style < self.style {
            recommendations.push("Use bullet points consistently; avoid large text blocks.".to_string());
        }
        if scores.ats_compatibility < self.ats {
            recommendations.push("Avoid tables/graphics; use standard fonts and section titles.".to_string());
        }
        if !missing_sections.is_empty() {
            recommendations.push(format!("Add missing sections: {}.", join(missing_sections)));
        }

        if recommendations.is_empty() {
            recommendations.push(WELL_PREPARED.to_string());
        }

        recommendations
    }
}

/// Recommendations with the default thresholds
pub fn recommend<S, T>(scores: &CompositeScore, missing_skills: &[S], missing_sections: &[T]) -> Vec<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    RecommendationRules::default().recommend(scores, missing_skills, missing_sections)
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
}
