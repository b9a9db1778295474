//! Resume scorer library
//!
//! Scores a resume against a job description by combining TF-IDF similarity,
//! job-skill coverage and an experience-years heuristic. Text is anonymized
//! before any scoring happens.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
pub use processing::analyzer::{FeatureResult, ScoreResult, ScoringSession};
pub use processing::batch::{rank_candidates, Candidate, RankedCandidate, RankingReport};
