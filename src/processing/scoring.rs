//! Composite score aggregation

use crate::error::{Result, ScorerError};
use crate::processing::sections::SectionReport;
use crate::processing::skill_matcher::SkillMatchResult;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Tailoring,
    Content,
    Style,
    AtsCompatibility,
    Sections,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Tailoring,
        Metric::Content,
        Metric::Style,
        Metric::AtsCompatibility,
        Metric::Sections,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Tailoring => "Tailoring (Skill Match)",
            Metric::Content => "Content (Semantic Match)",
            Metric::Style => "Style (Bullet Points)",
            Metric::AtsCompatibility => "ATS Compatibility",
            Metric::Sections => "Sections",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every metric as a whole percent in 0..=100, computed per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub tailoring: u8,
    pub content: u8,
    pub style: u8,
    pub ats_compatibility: u8,
    pub sections: u8,
}

/// Presentation metrics produced by the style strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMetrics {
    pub bullet_score: i32,
    pub ats_score: i32,
}

impl CompositeScore {
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Tailoring => self.tailoring,
            Metric::Content => self.content,
            Metric::Style => self.style,
            Metric::AtsCompatibility => self.ats_compatibility,
            Metric::Sections => self.sections,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        Metric::ALL.into_iter().map(move |metric| (metric, self.get(metric)))
    }

    /// Headline number shown as the overall resume score
    pub fn overall(&self) -> u8 {
        self.tailoring
    }
}

/// Ratio in [0, 1] to a whole percent; halves round to even and
/// out-of-range input is clamped
pub fn to_percent(ratio: f64) -> u8 {
    if ratio.is_nan() {
        return 0;
    }
    (ratio * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Combine the individual signals into the composite score.
///
/// A missing similarity means one of the texts was empty, and the whole
/// request cannot be scored.
pub fn aggregate(
    similarity: Option<f32>,
    skill_match: &SkillMatchResult,
    vocabulary_size: usize,
    section_report: &SectionReport,
    style: StyleMetrics,
) -> Result<CompositeScore> {
    let similarity = similarity.ok_or_else(|| {
        ScorerError::EmptyInput("resume or job description has no scorable text".to_string())
    })?;

    let content = if vocabulary_size > 0 {
        to_percent(skill_match.matched_skills.len() as f64 / vocabulary_size as f64)
    } else {
        0
    };

    Ok(CompositeScore {
        tailoring: to_percent(similarity as f64),
        content,
        style: clamp_percent(style.bullet_score),
        ats_compatibility: clamp_percent(style.ats_score),
        sections: section_report.presence_ratio.min(100),
    })
}
