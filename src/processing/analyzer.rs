//! Scoring session: job-dependent state built once, reused per resume

use crate::config::{Config, DEFAULT_MAX_RESUME_CHARS};
use crate::error::{Result, ResumeScorerError};
use crate::processing::anonymizer::Anonymizer;
use crate::processing::scorer::{compute_final_score, ScoreBreakdown};
use crate::processing::similarity::SimilarityEngine;
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::text_processor::TextProcessor;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use crate::processing::skill_extractor::FeatureResult;

/// Outcome of scoring one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub final_score: f64,
    pub similarity: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub skill_match_ratio: f64,
    pub experience_years: u32,
}

impl ScoreResult {
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::new(self.similarity, self.skill_match_ratio, self.experience_years)
    }
}

/// Everything derived from one job description.
///
/// Holds the prepared job text, its skill phrases and the fitted similarity
/// engine. Build a new session for every job description.
pub struct ScoringSession {
    anonymizer: Anonymizer,
    skill_extractor: SkillExtractor,
    similarity_engine: SimilarityEngine,
    job_text: String,
    job_skills: BTreeSet<String>,
    max_resume_chars: usize,
}

impl ScoringSession {
    pub fn new(job_description: &str, config: &Config) -> Result<Self> {
        let anonymizer = Anonymizer::with_config(&config.anonymizer)?;
        Self::with_anonymizer(job_description, anonymizer, config.processing.max_resume_chars)
    }

    /// Session with built-in gazetteers and the default character cap.
    pub fn with_defaults(job_description: &str) -> Result<Self> {
        Self::with_anonymizer(job_description, Anonymizer::new()?, DEFAULT_MAX_RESUME_CHARS)
    }

    pub fn with_anonymizer(
        job_description: &str,
        anonymizer: Anonymizer,
        max_resume_chars: usize,
    ) -> Result<Self> {
        if max_resume_chars == 0 {
            return Err(ResumeScorerError::InvalidInput(
                "Resume character cap must be greater than zero".to_string(),
            ));
        }

        let skill_extractor = SkillExtractor::new()?;
        let job_text = anonymizer.anonymize(&job_description.to_lowercase());
        let job_skills = skill_extractor.extract_job_skills(&job_text);
        let similarity_engine = SimilarityEngine::fit(&job_text);

        info!(
            "Prepared job description: {} skill phrases, {} vocabulary terms",
            job_skills.len(),
            similarity_engine.vectorizer().vocabulary_size()
        );

        Ok(Self {
            anonymizer,
            skill_extractor,
            similarity_engine,
            job_text,
            job_skills,
            max_resume_chars,
        })
    }

    pub fn job_text(&self) -> &str {
        &self.job_text
    }

    pub fn job_skills(&self) -> &BTreeSet<String> {
        &self.job_skills
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skill_extractor
    }

    /// Hard-truncate, anonymize and lower-case raw resume text.
    ///
    /// The cap applies to the raw characters first so redaction can never
    /// pull text from beyond the cap into the scored window; the second cut
    /// bounds growth from markers longer than the words they replace.
    pub fn prepare_resume(&self, raw_resume: &str) -> String {
        let raw = TextProcessor::truncate_chars(raw_resume, self.max_resume_chars);
        let anonymized = self.anonymizer.anonymize(raw).to_lowercase();
        TextProcessor::truncate_chars(&anonymized, self.max_resume_chars).to_string()
    }

    /// Score resume text that has already been through [`prepare_resume`].
    ///
    /// [`prepare_resume`]: ScoringSession::prepare_resume
    pub fn score_prepared(&self, resume_text: &str) -> ScoreResult {
        let features = self
            .skill_extractor
            .extract_resume_features(resume_text, &self.job_skills);
        let similarity = self
            .similarity_engine
            .compute_similarity(resume_text, &self.job_text);
        let final_score = compute_final_score(
            similarity,
            features.skill_match_ratio,
            features.experience_years,
        );

        debug!(
            "Scored resume: final={:.3} similarity={:.3} matched={} missing={} years={}",
            final_score,
            similarity,
            features.matched_skills.len(),
            features.missing_skills.len(),
            features.experience_years
        );

        ScoreResult {
            final_score,
            similarity,
            matched_skills: features.matched_skills,
            missing_skills: features.missing_skills,
            skill_match_ratio: features.skill_match_ratio,
            experience_years: features.experience_years,
        }
    }

    /// Full per-resume pipeline on raw extracted text.
    pub fn score_text(&self, raw_resume: &str) -> ScoreResult {
        let prepared = self.prepare_resume(raw_resume);
        self.score_prepared(&prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Looking for a data analyst with experience in Python, SQL,\n\
                       data analysis, statistics, and machine learning.";

    #[test]
    fn test_scenario_outranks_unrelated_resume() {
        let session = ScoringSession::with_defaults(JOB).unwrap();

        let good = session.score_text("python sql 2020 2021");
        let bad = session.score_text("carpentry woodwork gardening");

        assert!(good.matched_skills.contains("python"));
        assert!(good.matched_skills.contains("sql"));
        assert_eq!(good.experience_years, 2);
        assert!(good.final_score > bad.final_score);
        assert!(good.matched_skills.is_disjoint(&good.missing_skills));
    }

    #[test]
    fn test_scores_within_bounds() {
        let session = ScoringSession::with_defaults(JOB).unwrap();
        let result = session.score_text(JOB);

        for value in [result.final_score, result.similarity, result.skill_match_ratio] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!((result.breakdown().total() - result.final_score).abs() < 1e-12);
    }

    #[test]
    fn test_empty_job_description() {
        let session = ScoringSession::with_defaults("").unwrap();
        assert!(session.job_skills().is_empty());

        let result = session.score_text("python sql machine learning 2019");
        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.skill_match_ratio, 0.0);
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_job_description_is_anonymized() {
        let session = ScoringSession::with_defaults("Python role in London; he will lead").unwrap();
        assert!(!session.job_text().contains("london"));
        assert!(!session.job_text().contains(" he "));
    }

    #[test]
    fn test_truncation_determinism() {
        let session = ScoringSession::with_defaults(JOB).unwrap();
        let long_resume = "python sql statistics 2018 ".repeat(200);
        let prefix: String = long_resume.chars().take(3000).collect();

        assert!(long_resume.chars().count() > 3000);
        assert_eq!(session.score_text(&long_resume), session.score_text(&prefix));
    }

    #[test]
    fn test_truncation_ignores_redaction_length() {
        let session = ScoringSession::with_defaults(JOB).unwrap();
        let mut resume = String::from("Based in San Francisco. ");
        while resume.chars().count() < 2990 {
            resume.push_str("carpentry ");
        }
        resume.push_str("python sql statistics machine learning 2018 2019");
        let prefix: String = resume.chars().take(3000).collect();

        let full = session.score_text(&resume);
        assert_eq!(full, session.score_text(&prefix));
        assert!(!full.matched_skills.contains("sql"));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let anonymizer = Anonymizer::new().unwrap();
        assert!(ScoringSession::with_anonymizer(JOB, anonymizer, 0).is_err());
    }
}
