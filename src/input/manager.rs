//! Input manager for handling different file types

use crate::error::{Result, ScorerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::DocumentText;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, DocumentText>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<DocumentText> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ScorerError::Extraction(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        info!("Extracting text from {} file: {}", file_type, path.display());

        let raw = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(ScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let document = DocumentText::from_raw(&raw);
        debug!("Extracted {} chars from {}", document.len(), path.display());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), document.clone());
        }

        Ok(document)
    }

    /// Extract an in-memory document, e.g. an upload that never touched disk
    pub fn extract_bytes(&self, bytes: &[u8], file_type: FileType) -> Result<DocumentText> {
        let raw = match file_type {
            FileType::Pdf => PdfExtractor.extract_bytes(bytes)?,
            FileType::Text => PlainTextExtractor.extract_bytes(bytes)?,
            FileType::Markdown => MarkdownExtractor.extract_bytes(bytes)?,
            FileType::Unknown => {
                return Err(ScorerError::UnsupportedFormat(
                    "Unsupported file type for in-memory document".to_string(),
                ));
            }
        };
        Ok(DocumentText::from_raw(&raw))
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
