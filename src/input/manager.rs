//! Input manager for resume documents and job descriptions

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::batch::Candidate;
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
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
        }
    }

    /// Extract plain text from a PDF or DOCX resume.
    pub async fn extract_resume(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cached(path) {
            return Ok(cached_text);
        }

        Self::ensure_exists(path)?;
        let file_type = FileType::from_path(path);
        if !file_type.is_resume_document() {
            return Err(ResumeScorerError::UnsupportedFormat(format!(
                "Resume must be a PDF or DOCX file: {}",
                path.display()
            )));
        }

        let text = if file_type == FileType::Pdf {
            info!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path).await?
        } else {
            info!("Extracting text from DOCX: {}", path.display());
            DocxExtractor.extract(path).await?
        };

        self.store(path, &text);
        Ok(text)
    }

    /// Read a job description from a UTF-8 text or Markdown file.
    pub async fn read_job_description(&mut self, path: &Path) -> Result<String> {
        if let Some(cached_text) = self.cached(path) {
            return Ok(cached_text);
        }

        Self::ensure_exists(path)?;
        let file_type = FileType::from_path(path);
        if !file_type.is_job_description() {
            return Err(ResumeScorerError::UnsupportedFormat(format!(
                "Job description must be a .txt or .md file: {}",
                path.display()
            )));
        }

        let text = if file_type == FileType::Markdown {
            info!("Processing markdown job description: {}", path.display());
            MarkdownExtractor.extract(path).await?
        } else {
            info!("Reading job description: {}", path.display());
            PlainTextExtractor.extract(path).await?
        };

        self.store(path, &text);
        Ok(text)
    }

    /// Load resume files as batch candidates keyed by file name.
    ///
    /// Failures are returned per file so the batch can skip them.
    pub async fn load_candidates(&mut self, paths: &[PathBuf]) -> Vec<Result<Candidate>> {
        let mut candidates = Vec::with_capacity(paths.len());

        for path in paths {
            let id = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let candidate = self
                .extract_resume(path)
                .await
                .map(|text| Candidate { id, text });
            candidates.push(candidate);
        }

        candidates
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn cached(&self, path: &Path) -> Option<String> {
        let cached = self.cache.get(path).cloned();
        if cached.is_some() {
            info!("Using cached text for: {}", path.display());
        }
        cached
    }

    fn store(&mut self, path: &Path, text: &str) {
        self.cache.insert(path.to_path_buf(), text.to_string());
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(ResumeScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )))
        }
    }
}
