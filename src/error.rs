//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension is not one the document parser understands.
    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    /// The document (or batch row) exists but its text cannot be read.
    #[error("Failed to parse document: {0}")]
    ParseFailure(String),

    /// A required input is absent or blank. Reported as a warning, not a crash.
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResumeScorerError {
    /// Whether the error concerns user input rather than a failure of the tool.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ResumeScorerError::MissingInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;
