//! Text extraction from various file formats

use crate::error::{Result, ScorerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::future::Future;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

/// Raw text extraction for one document format. Output keeps the
/// document's line breaks; whitespace collapsing happens in `DocumentText`.
pub trait TextExtractor: Sync {
    fn file_type(&self) -> FileType;

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;

    fn extract(&self, path: &Path) -> impl Future<Output = Result<String>> + Send {
        async move {
            let bytes = fs::read(path).await.map_err(|e| {
                ScorerError::Extraction(format!(
                    "Cannot read {} file '{}': {}",
                    self.file_type(),
                    path.display(),
                    e
                ))
            })?;
            self.extract_bytes(&bytes).map_err(|e| match e {
                ScorerError::Extraction(cause) => ScorerError::Extraction(format!(
                    "{} file '{}': {}",
                    self.file_type(),
                    path.display(),
                    cause
                )),
                other => other,
            })
        }
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pdf
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ScorerError::Extraction(format!("Failed to extract text from PDF: {}", e)))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn file_type(&self) -> FileType {
        FileType::Text
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ScorerError::Extraction(format!("Text is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn file_type(&self) -> FileType {
        FileType::Markdown
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract_bytes(bytes)?;

        let mut html_output = String::new();
        html::push_html(&mut html_output, Parser::new(&markdown));

        Ok(html_to_text(&html_output))
    }
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

/// List items keep a bullet so layout heuristics still see them
fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<li>", "<li>• ")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let stripped = tag_regex().replace_all(&text, "").replace("&amp;", "&");

    stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
