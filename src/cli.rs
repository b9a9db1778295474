//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Bias-aware resume and job description match scoring")]
#[command(
    long_about = "Score resumes against a job description using TF-IDF similarity, job-skill coverage and years of experience. Text is anonymized before scoring."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Job description given either as a file or inline text.
#[derive(Args, Debug, Clone)]
#[group(required = false, multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one resume against a job description
    Score {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show the score breakdown
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank many resumes against one job description
    Rank {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// CSV file with ID and Resume_str columns
        #[arg(long, conflicts_with = "resumes")]
        csv: Option<PathBuf>,

        /// Resume files (PDF, DOCX)
        resumes: Vec<PathBuf>,

        /// Show only the top N candidates (the CSV export keeps all)
        #[arg(short, long)]
        top: Option<usize>,

        /// Where to write the ranking CSV
        #[arg(long)]
        output_csv: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the skill phrases extracted from a job description
    Skills {
        #[command(flatten)]
        job: JobSource,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
