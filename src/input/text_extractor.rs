//! Text extraction from resume documents and job-description files

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Extract resume text from in-memory document bytes, dispatching on the
/// extension of `file_name`. Only PDF and DOCX are accepted.
pub fn extract_resume_from_bytes(file_name: &str, bytes: &[u8]) -> Result<String> {
    match FileType::from_path(Path::new(file_name)) {
        FileType::Pdf => pdf_text_from_bytes(file_name, bytes),
        FileType::Docx => docx_text_from_bytes(file_name, bytes),
        _ => Err(ResumeScorerError::UnsupportedFormat(format!(
            "'{}' is not a PDF or DOCX document",
            file_name
        ))),
    }
}

/// Page texts joined by newlines; pages without text are skipped.
///
/// pdf-extract panics on some malformed documents (for example a font
/// missing from the page resources), so the call runs under `catch_unwind`
/// and a panic is reported as a parse failure like any other.
pub fn pdf_text_from_bytes(file_name: &str, bytes: &[u8]) -> Result<String> {
    let extracted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match extracted {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            return Err(ResumeScorerError::ParseFailure(format!(
                "Failed to extract text from PDF '{}': {}",
                file_name, e
            )))
        }
        Err(_) => {
            return Err(ResumeScorerError::ParseFailure(format!(
                "Failed to extract text from PDF '{}': malformed document",
                file_name
            )))
        }
    };

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Non-empty paragraph texts of `word/document.xml`, joined by newlines.
pub fn docx_text_from_bytes(file_name: &str, bytes: &[u8]) -> Result<String> {
    let parse_error = |detail: String| {
        ResumeScorerError::ParseFailure(format!("Failed to read DOCX '{}': {}", file_name, detail))
    };

    let xml = {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| parse_error(e.to_string()))?;
        let mut document = archive
            .by_name("word/document.xml")
            .map_err(|e| parse_error(e.to_string()))?;
        let mut xml = String::new();
        document
            .read_to_string(&mut xml)
            .map_err(|e| parse_error(e.to_string()))?;
        xml
    };

    let paragraphs = docx_paragraphs(&xml).map_err(parse_error)?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string())
}

fn docx_paragraphs(xml: &str) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!("XML error at position {}: {}", reader.buffer_position(), e))
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs)
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        pdf_text_from_bytes(&path.display().to_string(), &bytes)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        docx_text_from_bytes(&path.display().to_string(), &bytes)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = re.replace_all(&text, "").replace("&amp;", "&");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}
