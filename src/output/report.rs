//! Report structures built from scoring results

use crate::processing::analyzer::ScoreResult;
use crate::processing::batch::RankingReport;
use crate::processing::scorer::{
    ScoreBreakdown, EXPERIENCE_WEIGHT, SIMILARITY_WEIGHT, SKILL_WEIGHT,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-resume report ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Final score on a 0-100 scale.
    pub score_percentage: f64,

    pub result: ScoreResult,

    pub breakdown: ScoreBreakdown,

    pub weights: ComponentWeights,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub similarity_weight: f64,
    pub skill_weight: f64,
    pub experience_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_source: String,
    pub job_source: String,
    /// Skill phrases extracted from the job description.
    pub job_skill_count: usize,
}

/// Ranked batch plus the metadata shown alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSummary {
    pub ranking: RankingReport,
    pub metadata: ReportMetadata,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            similarity_weight: SIMILARITY_WEIGHT,
            skill_weight: SKILL_WEIGHT,
            experience_weight: EXPERIENCE_WEIGHT,
        }
    }
}

impl ReportMetadata {
    pub fn new(resume_source: &str, job_source: &str, job_skill_count: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: resume_source.to_string(),
            job_source: job_source.to_string(),
            job_skill_count,
        }
    }
}

impl ScoreReport {
    pub fn new(result: ScoreResult, metadata: ReportMetadata) -> Self {
        Self {
            score_percentage: to_percentage(result.final_score),
            breakdown: result.breakdown(),
            weights: ComponentWeights::default(),
            result,
            metadata,
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self.score_percentage {
            s if s >= 75.0 => "Strong match",
            s if s >= 55.0 => "Good match",
            s if s >= 35.0 => "Partial match",
            _ => "Weak match",
        }
    }
}

/// Score on a 0-100 scale, rounded to one decimal.
pub fn to_percentage(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
