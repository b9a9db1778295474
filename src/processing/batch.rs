//! Ranking many resumes against one job description

use crate::error::Result;
use crate::processing::analyzer::{ScoreResult, ScoringSession};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One resume awaiting scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    /// Position in the input, starting at 1.
    pub position: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingReport {
    /// Successful results, highest score first.
    pub ranked: Vec<RankedCandidate>,
    pub skipped: Vec<SkippedCandidate>,
    /// Successful results before any limit was applied.
    pub scored_count: usize,
}

/// Score every candidate with the shared session and sort by final score.
///
/// Candidates that failed to load are logged and skipped; the rest of the
/// batch carries on. Ties keep input order. `limit` keeps only the top N.
pub fn rank_candidates<I>(session: &ScoringSession, candidates: I, limit: Option<usize>) -> RankingReport
where
    I: IntoIterator<Item = Result<Candidate>>,
{
    let mut report = RankingReport::default();

    for (index, candidate) in candidates.into_iter().enumerate() {
        let position = index + 1;
        match candidate {
            Ok(candidate) => {
                let result = session.score_text(&candidate.text);
                report.ranked.push(RankedCandidate {
                    candidate_id: candidate.id,
                    result,
                });
            }
            Err(e) => {
                warn!("Skipping resume #{}: {}", position, e);
                report.skipped.push(SkippedCandidate {
                    position,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
        .ranked
        .sort_by(|a, b| b.result.final_score.total_cmp(&a.result.final_score));
    report.scored_count = report.ranked.len();

    if let Some(limit) = limit {
        report.ranked.truncate(limit);
    }

    info!(
        "Ranked {} resumes ({} skipped)",
        report.scored_count,
        report.skipped.len()
    );

    report
}
