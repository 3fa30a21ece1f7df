//! Skill vocabulary matching against resume and job description text

use crate::config::MatchMode;
use crate::error::{Result, ScorerError};
use crate::processing::document::NormalizedText;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a resume phrase to be reported as a
/// possible spelling variant of a missing skill
pub const NEAR_MISS_THRESHOLD: f64 = 0.9;

/// Caller supplied skills, trimmed and lower-cased, in input order.
/// Duplicates are kept; matching reports them once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// A resume phrase that closely resembles a missing skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub skill: String,
    pub found: String,
    pub similarity: f64,
}

impl SkillVocabulary {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { skills }
    }

    /// Parse free-form user input: comma or newline separated
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(|c| c == ',' || c == '\n'))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    /// An empty vocabulary is a `ValidationWarning` carrying user guidance
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ScorerError::ValidationWarning(EMPTY_VOCABULARY.to_string()));
        }
        Ok(())
    }
}

const EMPTY_VOCABULARY: &str = "Please enter at least one skill to compare against the job description.";

/// Literal skill matcher. In `Substring` mode "java" also matches inside
/// "javascript"; `WordBoundary` requires the skill to start and end on
/// token boundaries of the normalized text.
#[derive(Debug, Clone, Copy)]
pub struct SkillMatcher {
    mode: MatchMode,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(MatchMode::Substring)
    }
}

impl SkillMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Partition the vocabulary into skills found in the resume and skills
    /// the job asks for that the resume lacks. Skills in neither text are
    /// dropped silently.
    pub fn match_skills(
        &self,
        resume: &NormalizedText,
        job: &NormalizedText,
        vocabulary: &SkillVocabulary,
    ) -> SkillMatchResult {
        if vocabulary.is_empty() {
            return SkillMatchResult::default();
        }

        let mut unique: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for skill in vocabulary.iter() {
            if seen.insert(skill) {
                unique.push(skill);
            }
        }

        let in_resume = self.find_skills(resume.as_str(), &unique);
        let in_job = self.find_skills(job.as_str(), &unique);

        let mut result = SkillMatchResult::default();
        for skill in vocabulary.iter() {
            if in_resume.contains(skill) {
                result.matched_skills.push(skill.to_string());
            } else if in_job.contains(skill) {
                result.missing_skills.push(skill.to_string());
            }
        }
        result
    }

    fn find_skills<'a>(&self, text: &str, skills: &[&'a str]) -> HashSet<&'a str> {
        let mut found = HashSet::new();

        match AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(skills)
        {
            Ok(automaton) => {
                for mat in automaton.find_overlapping_iter(text) {
                    if self.accepts(text, mat.start(), mat.end()) {
                        found.insert(skills[mat.pattern().as_usize()]);
                    }
                }
            }
            Err(_) => {
                // Automaton limits exceeded; scan each skill directly
                for skill in skills {
                    let hit = text
                        .match_indices(*skill)
                        .any(|(start, m)| self.accepts(text, start, start + m.len()));
                    if hit {
                        found.insert(*skill);
                    }
                }
            }
        }

        found
    }

    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        match self.mode {
            MatchMode::Substring => true,
            MatchMode::WordBoundary => {
                let bytes = text.as_bytes();
                let starts_clean = start == 0 || bytes[start - 1] == b' ';
                let ends_clean = end == bytes.len() || bytes[end] == b' ';
                starts_clean && ends_clean
            }
        }
    }
}

/// For each missing skill, the resume phrase of the same word count that
/// resembles it most, when at least `NEAR_MISS_THRESHOLD` similar.
pub fn near_misses(resume: &NormalizedText, missing_skills: &[String]) -> Vec<NearMiss> {
    let tokens: Vec<&str> = resume.tokens().collect();
    let mut reported = HashSet::new();
    let mut misses = Vec::new();

    for skill in missing_skills {
        if !reported.insert(skill.as_str()) {
            continue;
        }

        let width = skill.split_whitespace().count().max(1);
        if tokens.len() < width {
            continue;
        }

        let best = tokens
            .windows(width)
            .map(|window| window.join(" "))
            .filter(|phrase| phrase.chars().count() >= 3 && phrase != skill)
            .map(|phrase| {
                let similarity = jaro_winkler(skill, &phrase);
                (phrase, similarity)
            })
            .filter(|(_, similarity)| *similarity >= NEAR_MISS_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((found, similarity)) = best {
            misses.push(NearMiss {
                skill: skill.clone(),
                found,
                similarity,
            });
        }
    }

    misses
}
