//! Output formatters for single-resume reports and batch rankings

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{to_percentage, RankingSummary, ScoreReport};
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

pub const NO_MATCHED_SKILLS: &str = "None";
pub const NO_MISSING_SKILLS: &str = "All matched";

pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    /// Render at most `limit` rows of a ranking.
    fn format_ranking(&self, summary: &RankingSummary, limit: usize) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn skill_list(skills: &BTreeSet<String>, empty_marker: &str) -> String {
    if skills.is_empty() {
        empty_marker.to_string()
    } else {
        skills.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn source_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, percentage: f64) -> String {
        let (badge, color) = match percentage {
            p if p >= 75.0 => ("STRONG", Color::Green),
            p if p >= 55.0 => ("GOOD", Color::BrightGreen),
            p if p >= 35.0 => ("PARTIAL", Color::Yellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH SCORE", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Final Score: {:.1}% {}\n",
            report.score_percentage,
            self.format_score_badge(report.score_percentage)
        ));
        output.push_str(&format!("Similarity: {:.3}\n", result.similarity));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(report.verdict(), Color::Cyan)
        ));

        output.push_str(&self.format_header("✅ Matched Skills", 3));
        output.push_str(&format!(
            "  {}\n",
            self.colorize(&skill_list(&result.matched_skills, NO_MATCHED_SKILLS), Color::Green)
        ));

        output.push_str(&self.format_header("🎯 Missing Skills", 3));
        output.push_str(&format!(
            "  {}\n",
            self.colorize(&skill_list(&result.missing_skills, NO_MISSING_SKILLS), Color::Yellow)
        ));

        if self.detailed {
            output.push_str(&self.format_header("Score Breakdown", 2));
            output.push_str(&format!(
                "Similarity:  {:.3} x {:.1} = {:.3}\n",
                result.similarity, report.weights.similarity_weight, report.breakdown.similarity_component
            ));
            output.push_str(&format!(
                "Skill match: {:.3} x {:.1} = {:.3}\n",
                result.skill_match_ratio, report.weights.skill_weight, report.breakdown.skill_component
            ));
            output.push_str(&format!(
                "Experience:  {} yrs x {:.1} = {:.3}\n",
                result.experience_years, report.weights.experience_weight, report.breakdown.experience_component
            ));
            output.push_str(&format!(
                "Job skill phrases: {}\n",
                report.metadata.job_skill_count
            ));
        }

        output.push_str(&format!(
            "\n{} Resume Scorer v{} | Resume: {} | Job: {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.scorer_version,
            source_name(&report.metadata.resume_source),
            source_name(&report.metadata.job_source)
        ));

        Ok(output)
    }

    fn format_ranking(&self, summary: &RankingSummary, limit: usize) -> Result<String> {
        let ranking = &summary.ranking;
        let mut output = String::new();

        output.push_str(&self.format_header("🏆 CANDIDATE RANKING", 1));
        output.push_str(&format!(
            "Scored: {} | Skipped: {} | Job skill phrases: {}\n",
            ranking.scored_count,
            ranking.skipped.len(),
            summary.metadata.job_skill_count
        ));

        if ranking.ranked.is_empty() {
            output.push_str(&self.colorize("\nNo resumes could be scored.\n", Color::Yellow));
            return Ok(output);
        }

        output.push_str(&self.format_header(&format!("Top {}", limit.min(ranking.ranked.len())), 2));
        output.push_str(&format!(
            "{:<5} {:<24} {:>8} {:>10}  {}\n",
            "Rank", "Candidate", "Score", "Similarity", "Matched skills"
        ));

        for (i, entry) in ranking.ranked.iter().take(limit).enumerate() {
            let line = format!(
                "{:<5} {:<24} {:>7.1}% {:>10.3}  {}\n",
                i + 1,
                entry.candidate_id,
                to_percentage(entry.result.final_score),
                entry.result.similarity,
                skill_list(&entry.result.matched_skills, NO_MATCHED_SKILLS)
            );
            if i == 0 {
                output.push_str(&self.colorize(&line, Color::Green));
            } else {
                output.push_str(&line);
            }
        }

        if self.detailed && !ranking.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped", 3));
            for skipped in &ranking.skipped {
                output.push_str(&format!(
                    "  #{} {}\n",
                    skipped.position,
                    self.colorize(&skipped.reason, Color::BrightBlack)
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_ranking(&self, summary: &RankingSummary, limit: usize) -> Result<String> {
        let mut limited = summary.clone();
        limited.ranking.ranked.truncate(limit);
        self.to_json(&limited)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_skill_list(skills: &BTreeSet<String>, empty_marker: &str) -> String {
        if skills.is_empty() {
            format!("_{}_", empty_marker)
        } else {
            skills
                .iter()
                .map(|skill| format!("`{}`", skill))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                source_name(&report.metadata.resume_source),
                source_name(&report.metadata.job_source)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Final Score:** {:.1}%\n\n", report.score_percentage));
        output.push_str(&format!("**Similarity:** {:.3}\n\n", result.similarity));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Value | Weight | Contribution |\n");
        output.push_str("|-----------|-------|--------|--------------|\n");
        output.push_str(&format!(
            "| Similarity | {:.3} | {:.1} | {:.3} |\n",
            result.similarity, report.weights.similarity_weight, report.breakdown.similarity_component
        ));
        output.push_str(&format!(
            "| Skill match | {:.3} | {:.1} | {:.3} |\n",
            result.skill_match_ratio, report.weights.skill_weight, report.breakdown.skill_component
        ));
        output.push_str(&format!(
            "| Experience | {} yrs | {:.1} | {:.3} |\n\n",
            result.experience_years, report.weights.experience_weight, report.breakdown.experience_component
        ));

        output.push_str("## ✅ Matched Skills\n\n");
        output.push_str(&Self::markdown_skill_list(&result.matched_skills, NO_MATCHED_SKILLS));
        output.push_str("\n\n## 🎯 Missing Skills\n\n");
        output.push_str(&Self::markdown_skill_list(&result.missing_skills, NO_MISSING_SKILLS));
        output.push_str("\n\n");

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Scorer v{}*\n",
                report.metadata.scorer_version
            ));
        }

        Ok(output)
    }

    fn format_ranking(&self, summary: &RankingSummary, limit: usize) -> Result<String> {
        let ranking = &summary.ranking;
        let mut output = String::new();

        output.push_str("# 🏆 Candidate Ranking\n\n");
        output.push_str(&format!(
            "**Scored:** {} | **Skipped:** {}\n\n",
            ranking.scored_count,
            ranking.skipped.len()
        ));

        output.push_str("| Rank | Candidate | Score | Similarity | Matched skills |\n");
        output.push_str("|------|-----------|-------|------------|----------------|\n");
        for (i, entry) in ranking.ranked.iter().take(limit).enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.1}% | {:.3} | {} |\n",
                i + 1,
                entry.candidate_id,
                to_percentage(entry.result.final_score),
                entry.result.similarity,
                skill_list(&entry.result.matched_skills, NO_MATCHED_SKILLS)
            ));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} by Resume Scorer v{}*\n",
                summary.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                summary.metadata.scorer_version
            ));
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_ranking(
        &self,
        summary: &RankingSummary,
        format: OutputFormat,
        limit: usize,
    ) -> Result<String> {
        self.formatter(format).format_ranking(summary, limit)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_score{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_score{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_score{}.md", base_name, timestamp_suffix),
    }
}
