//! Document text types and normalization

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Plain text extracted from a resume or job description.
///
/// `text` has every whitespace run collapsed to a single space. `lines`
/// keeps the layout the extractor saw, which the formatting heuristics need.
/// An empty document is valid and means "no content".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    text: String,
    lines: Vec<String>,
}

/// Lower-cased text reduced to word characters separated by single spaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedText(String);

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("Invalid non-word regex"))
}

impl DocumentText {
    /// Build from raw extractor output, keeping the line layout
    pub fn from_raw(raw: &str) -> Self {
        let text = whitespace_regex().replace_all(raw, " ").trim().to_string();
        let lines = raw
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.trim().is_empty())
            .collect();

        Self { text, lines }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn normalize(&self) -> NormalizedText {
        normalize(&self.text)
    }
}

impl From<&str> for DocumentText {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<String> for DocumentText {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl fmt::Display for DocumentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lower-case, replace each run of non-word characters with one space, trim.
/// Word characters are Unicode letters, digits and underscore.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let collapsed = non_word_regex().replace_all(&lowered, " ");
    NormalizedText(collapsed.trim().to_string())
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Space-separated tokens
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Copy with a prefix glued on, for models that expect
    /// "query: " / "passage: " style markers
    pub fn with_prefix(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
