//! Resume scorer: bias-aware resume and job description match scoring

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::input::{CsvResumeSource, InputManager};
use resume_scorer::output::csv_export::export_ranking;
use resume_scorer::output::formatter::{save_report_to_file, suggest_filename};
use resume_scorer::output::{RankingSummary, ReportGenerator, ReportMetadata, ScoreReport};
use resume_scorer::{rank_candidates, ResumeScorerError, ScoringSession};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        if let Some(err) = e.downcast_ref::<ResumeScorerError>() {
            if err.is_missing_input() {
                println!("{} {}", "⚠️ ".yellow().bold(), err);
                process::exit(2);
            }
        }
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load default config"),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
        } => score_command(&config, resume, &job, output, save, detailed).await,

        Commands::Rank {
            job,
            csv,
            resumes,
            top,
            output_csv,
            output,
        } => rank_command(&config, &job, csv, resumes, top, output_csv, output).await,

        Commands::Skills { job } => skills_command(&config, &job).await,

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    let rendered = toml::to_string_pretty(&config)
                        .context("Failed to render configuration")?;
                    println!("{}", rendered);
                }
                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}

fn resolve_output_format(flag: Option<String>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(format) => cli::parse_output_format(&format)
            .map_err(|e| ResumeScorerError::InvalidInput(e).into()),
        None => Ok(config.output.format),
    }
}

/// Job description text plus a label for reports.
async fn resolve_job(job: &JobSource, input_manager: &mut InputManager) -> Result<(String, String)> {
    match (&job.job, &job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, &["txt", "md", "markdown"])
                .map_err(|e| ResumeScorerError::InvalidInput(format!("Job description file: {}", e)))?;
            let text = input_manager
                .read_job_description(path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            if text.trim().is_empty() {
                return Err(ResumeScorerError::MissingInput(format!(
                    "Job description {} is blank",
                    path.display()
                ))
                .into());
            }
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) if !text.trim().is_empty() => Ok((text.clone(), "inline text".to_string())),
        _ => Err(ResumeScorerError::MissingInput(
            "Please provide a job description (--job <file> or --job-text <text>)".to_string(),
        )
        .into()),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn score_command(
    config: &Config,
    resume: Option<PathBuf>,
    job: &JobSource,
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    let resume = resume.ok_or_else(|| {
        ResumeScorerError::MissingInput("Please provide a resume (--resume <pdf|docx>)".to_string())
    })?;
    let output_format = resolve_output_format(output, config)?;

    let mut input_manager = InputManager::new();
    let (job_text, job_source) = resolve_job(job, &mut input_manager).await?;

    cli::validate_file_extension(&resume, &["pdf", "docx"])
        .map_err(|e| ResumeScorerError::InvalidInput(format!("Resume file: {}", e)))?;

    info!("Scoring {} against {}", resume.display(), job_source);

    let progress = spinner("Scoring resume...");
    let resume_text = input_manager
        .extract_resume(&resume)
        .await
        .with_context(|| format!("Failed to extract text from {}", resume.display()))?;
    let session = ScoringSession::new(&job_text, config)?;
    let result = session.score_text(&resume_text);
    progress.finish_and_clear();

    let metadata = ReportMetadata::new(
        &resume.display().to_string(),
        &job_source,
        session.job_skills().len(),
    );
    let report = ScoreReport::new(result, metadata);

    let generator =
        ReportGenerator::with_options(config.output.color_output, detailed || config.output.detailed);
    let rendered = generator.generate_report(&report, output_format)?;
    println!("{}", rendered);

    if let Some(save_path) = save {
        let target = if save_path.is_dir() {
            save_path.join(suggest_filename(output_format, &resume.to_string_lossy(), true))
        } else {
            save_path
        };
        // Saved files never carry terminal colour codes.
        let plain = ReportGenerator::with_options(false, detailed || config.output.detailed)
            .generate_report(&report, output_format)?;
        save_report_to_file(&plain, &target)
            .with_context(|| format!("Failed to save report to {}", target.display()))?;
        println!("💾 Report saved to {}", target.display());
    }

    Ok(())
}

async fn rank_command(
    config: &Config,
    job: &Path,
    csv: Option<PathBuf>,
    resumes: Vec<PathBuf>,
    top: Option<usize>,
    output_csv: Option<PathBuf>,
    output: Option<String>,
) -> Result<()> {
    let output_format = resolve_output_format(output, config)?;
    let mut input_manager = InputManager::new();
    let job_source = JobSource {
        job: Some(job.to_path_buf()),
        job_text: None,
    };
    let (job_text, job_label) = resolve_job(&job_source, &mut input_manager).await?;

    let session = ScoringSession::new(&job_text, config)?;

    let (report, source_label) = if let Some(csv_path) = csv {
        let mut source = CsvResumeSource::open(&csv_path)
            .with_context(|| format!("Failed to open resume CSV {}", csv_path.display()))?;
        let progress = spinner("Ranking resumes from CSV...");
        let report = rank_candidates(&session, progress.wrap_iter(source.candidates()), None);
        progress.finish_and_clear();
        (report, csv_path.display().to_string())
    } else if !resumes.is_empty() {
        let progress = ProgressBar::new(resumes.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            progress.set_style(style);
        }
        progress.set_message("extracting");
        let candidates = input_manager.load_candidates(&resumes).await;
        progress.set_message("scoring");
        let report = rank_candidates(&session, progress.wrap_iter(candidates.into_iter()), None);
        progress.finish_and_clear();
        (report, format!("{} files", resumes.len()))
    } else {
        return Err(ResumeScorerError::MissingInput(
            "Please provide resumes (--csv <file> or one or more resume files)".to_string(),
        )
        .into());
    };

    // The export keeps every scored candidate; --top only limits the display.
    let export_path = output_csv.unwrap_or_else(|| config.batch.output_path.clone());
    export_ranking(&export_path, &report.ranked)
        .with_context(|| format!("Failed to write ranking to {}", export_path.display()))?;

    let display_limit = top.unwrap_or(config.batch.display_limit);
    let summary = RankingSummary {
        metadata: ReportMetadata::new(&source_label, &job_label, session.job_skills().len()),
        ranking: report,
    };
    let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed);
    println!("{}", generator.generate_ranking(&summary, output_format, display_limit)?);
    println!("💾 Ranking saved to {}", export_path.display());

    Ok(())
}

async fn skills_command(config: &Config, job: &JobSource) -> Result<()> {
    let mut input_manager = InputManager::new();
    let (job_text, job_label) = resolve_job(job, &mut input_manager).await?;
    let session = ScoringSession::new(&job_text, config)?;
    let extractor = session.skill_extractor();

    println!("🔍 Skill phrases in {} ({})\n", job_label, session.job_skills().len());
    for phrase in session.job_skills() {
        let normalized = extractor.normalize_skill(phrase);
        let canonical = match extractor.canonicalize_skill(&normalized) {
            Some(canonical) if extractor.is_soft_skill(&canonical) => {
                format!("{} (soft skill, ignored)", canonical).dimmed().to_string()
            }
            Some(canonical) => canonical.green().to_string(),
            None => "(discarded)".dimmed().to_string(),
        };
        println!("  • {:<40} → {}", phrase, canonical);
    }

    Ok(())
}
