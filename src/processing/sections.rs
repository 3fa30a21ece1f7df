//! Resume section presence detection

use crate::processing::document::NormalizedText;
use crate::processing::scoring::to_percent;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Education,
    Experience,
    Projects,
    Skills,
    Summary,
    Certifications,
}

/// A section and the keywords (already in normalized form) that reveal it
#[derive(Debug, Clone, Copy)]
pub struct SectionDefinition {
    pub kind: SectionKind,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SectionTaxonomy {
    sections: &'static [SectionDefinition],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub found_sections: Vec<SectionKind>,
    pub missing_sections: Vec<SectionKind>,
    /// Whole percent of the taxonomy found, 0..=100
    pub presence_ratio: u8,
}

const STANDARD_SECTIONS: &[SectionDefinition] = &[
    SectionDefinition {
        kind: SectionKind::Education,
        keywords: &["education", "academic background", "qualifications", "degree"],
    },
    SectionDefinition {
        kind: SectionKind::Experience,
        keywords: &["experience", "employment", "work history", "career"],
    },
    SectionDefinition {
        kind: SectionKind::Projects,
        keywords: &["project", "portfolio"],
    },
    SectionDefinition {
        kind: SectionKind::Skills,
        keywords: &["skills", "competencies", "expertise", "tech stack"],
    },
    SectionDefinition {
        kind: SectionKind::Summary,
        keywords: &["summary", "profile", "objective", "about me", "overview"],
    },
    SectionDefinition {
        kind: SectionKind::Certifications,
        keywords: &["certification", "certificate", "license"],
    },
];

impl SectionTaxonomy {
    /// The six built-in resume sections, in reporting order
    pub const fn standard() -> Self {
        Self {
            sections: STANDARD_SECTIONS,
        }
    }

    pub const fn custom(sections: &'static [SectionDefinition]) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDefinition> {
        self.sections.iter()
    }
}

impl Default for SectionTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

/// A section is found when any of its keywords occurs in the resume text
pub fn detect_sections(resume: &NormalizedText, taxonomy: &SectionTaxonomy) -> SectionReport {
    let mut report = SectionReport::default();

    for section in taxonomy.iter() {
        if section.keywords.iter().any(|keyword| resume.contains(keyword)) {
            report.found_sections.push(section.kind);
        } else {
            report.missing_sections.push(section.kind);
        }
    }

    report.presence_ratio = if taxonomy.is_empty() {
        0
    } else {
        to_percent(report.found_sections.len() as f64 / taxonomy.len() as f64)
    };

    report
}

impl SectionReport {
    pub fn missing_names(&self) -> Vec<String> {
        self.missing_sections.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Projects => write!(f, "Projects"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Summary => write!(f, "Summary"),
            SectionKind::Certifications => write!(f, "Certifications"),
        }
    }
}
