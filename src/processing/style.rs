//! Style and ATS-compatibility scoring strategies plus formatting checks

use crate::processing::document::DocumentText;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

const MIN_BULLETS: usize = 3;
const CAPS_LINE_MIN_LEN: usize = 10;
const LONG_LINE_LEN: usize = 160;
const SPARSE_WORD_COUNT: usize = 50;

/// Scores one presentation metric of a resume as a whole percent
pub trait MetricStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, resume: &DocumentText) -> u8;
}

/// Constant score, independent of the text
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub u8);

impl MetricStrategy for FixedScore {
    fn name(&self) -> &str {
        "fixed"
    }

    fn score(&self, _resume: &DocumentText) -> u8 {
        self.0.min(100)
    }
}

/// Rewards bullet usage, penalises shouting headers and walls of text
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletStyleHeuristic;

impl MetricStrategy for BulletStyleHeuristic {
    fn name(&self) -> &str {
        "bullet-style"
    }

    fn score(&self, resume: &DocumentText) -> u8 {
        let stats = LayoutStats::collect(resume);
        let mut penalty = 0;

        if stats.few_bullets() {
            penalty += 30;
        }
        penalty += (stats.caps_lines * 5).min(20);
        penalty += (stats.long_lines * 5).min(30);

        100usize.saturating_sub(penalty) as u8
    }
}

/// Flags layouts that applicant tracking systems parse badly
#[derive(Debug, Clone, Copy, Default)]
pub struct AtsLayoutHeuristic;

impl MetricStrategy for AtsLayoutHeuristic {
    fn name(&self) -> &str {
        "ats-layout"
    }

    fn score(&self, resume: &DocumentText) -> u8 {
        let stats = LayoutStats::collect(resume);
        let mut penalty = 0;

        if stats.table_rows >= 2 {
            penalty += 30;
        }
        if stats.has_glyphs {
            penalty += 20;
        }
        if stats.word_count < SPARSE_WORD_COUNT {
            penalty += 20;
        }
        if !stats.has_email {
            penalty += 10;
        }

        100usize.saturating_sub(penalty) as u8
    }
}

/// Human readable formatting suggestions for the resume layout
pub fn formatting_issues(resume: &DocumentText) -> Vec<String> {
    let stats = LayoutStats::collect(resume);
    let mut issues = Vec::new();

    if stats.few_bullets() {
        issues.push("Use more bullet points for better readability.".to_string());
    }
    if stats.caps_lines > 0 {
        issues.push("Avoid using ALL CAPS excessively.".to_string());
    }
    if stats.long_lines > 0 {
        issues.push(format!(
            "{} lines are too long. Try breaking them up.",
            stats.long_lines
        ));
    }

    issues
}

#[derive(Debug, Default)]
struct LayoutStats {
    bullet_marks: usize,
    dash_marks: usize,
    caps_lines: usize,
    long_lines: usize,
    table_rows: usize,
    has_glyphs: bool,
    word_count: usize,
    has_email: bool,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
    })
}

impl LayoutStats {
    fn collect(resume: &DocumentText) -> Self {
        let text = resume.as_str();
        let mut stats = LayoutStats {
            bullet_marks: text.matches('•').count(),
            dash_marks: text.matches("- ").count(),
            word_count: text.unicode_words().count(),
            has_email: email_regex().is_match(text),
            has_glyphs: text.chars().any(is_graphic_glyph),
            ..Default::default()
        };

        for line in resume.lines() {
            let length = line.graphemes(true).count();
            if length > CAPS_LINE_MIN_LEN && is_all_caps(line) {
                stats.caps_lines += 1;
            }
            if length > LONG_LINE_LEN {
                stats.long_lines += 1;
            }
            if line.contains('\t') || line.matches('|').count() >= 2 {
                stats.table_rows += 1;
            }
        }

        stats
    }

    fn few_bullets(&self) -> bool {
        self.bullet_marks < MIN_BULLETS && self.dash_marks < MIN_BULLETS
    }
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Icon-font, box-drawing and replacement characters
fn is_graphic_glyph(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{2500}'..='\u{257F}' | '\u{FFFD}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formatted() -> DocumentText {
        let mut raw = String::from("Jane Doe\njane.doe@example.com\n\nExperience\n");
        for i in 0..4 {
            raw.push_str(&format!(
                "• Delivered project number {} on time with a small team of engineers and designers\n",
                i
            ));
        }
        raw.push_str("Skills\n- Rust\n- SQL\n- Docker\n");
        DocumentText::from_raw(&raw)
    }

    #[test]
    fn test_fixed_score() {
        assert_eq!(FixedScore(86).score(&DocumentText::default()), 86);
        assert_eq!(FixedScore(250).score(&DocumentText::default()), 100);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(FixedScore(86).name(), "fixed");
        assert_eq!(BulletStyleHeuristic.name(), "bullet-style");
        assert_eq!(AtsLayoutHeuristic.name(), "ats-layout");
    }

    #[test]
    fn test_well_formatted_resume_scores_full_marks() {
        let resume = well_formatted();
        assert_eq!(BulletStyleHeuristic.score(&resume), 100);
        assert!(formatting_issues(&resume).is_empty());
    }

    #[test]
    fn test_style_penalties() {
        let long_line = "word ".repeat(40);
        let raw = format!("PROFESSIONAL EXPERIENCE\nTECHNICAL SKILLS\n{}\n", long_line);
        let resume = DocumentText::from_raw(&raw);

        // no bullets -30, two caps lines -10, one long line -5
        assert_eq!(BulletStyleHeuristic.score(&resume), 55);

        let issues = formatting_issues(&resume);
        assert_eq!(
            issues,
            vec![
                "Use more bullet points for better readability.".to_string(),
                "Avoid using ALL CAPS excessively.".to_string(),
                "1 lines are too long. Try breaking them up.".to_string(),
            ]
        );
    }

    #[test]
    fn test_short_caps_lines_are_fine() {
        let resume = DocumentText::from_raw("SKILLS\nRUST, SQL\n");
        assert!(!formatting_issues(&resume)
            .iter()
            .any(|i| i.contains("ALL CAPS")));
    }

    #[test]
    fn test_ats_layout_penalties() {
        let clean = AtsLayoutHeuristic.score(&well_formatted());
        assert_eq!(clean, 100);

        let mut raw = String::from("Name | Role | Years\nAcme | Engineer | 3\n\u{E0B0} Contact\n");
        raw.push_str(&"filler ".repeat(60));
        let tabular = DocumentText::from_raw(&raw);

        // table -30, glyphs -20, no email -10
        assert_eq!(AtsLayoutHeuristic.score(&tabular), 40);
    }

    #[test]
    fn test_ats_layout_clean_dense_resume() {
        let mut raw = String::from("Jane Doe jane@example.com\n");
        raw.push_str(&"experience ".repeat(60));
        assert_eq!(AtsLayoutHeuristic.score(&DocumentText::from_raw(&raw)), 100);
    }
}
