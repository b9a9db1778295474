//! Job skill-phrase extraction and resume skill matching

use crate::error::{Result, ResumeScorerError};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Canonical concepts, highest priority first.
const HEAD_CONCEPTS: &[&str] = &[
    "python", "sql", "statistics", "machine learning", "data analysis",
    "data visualization", "databases", "spark", "hadoop", "tableau", "power bi",
    "numpy", "pandas",
];

/// Removed by plain substring replacement, in this order.
const FILLER_WORDS: &[&str] = &[
    "its", "strong", "excellent", "potentially", "technical", "non-technical",
    "multiple", "different", "various", "complex",
];

const ROLE_WORDS: &[&str] = &[
    "analyst", "engineer", "developer", "manager", "specialist", "professional",
    "candidate", "role",
];

const EXCLUDED_PHRASE_WORDS: &[&str] = &["experience", "knowledge", "ability"];

const MAX_PHRASE_TOKENS: usize = 4;
const MIN_PHRASE_CHARS: usize = 3;

/// Per-resume skill and experience features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureResult {
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub skill_match_ratio: f64,
    pub experience_years: u32,
}

pub struct SkillExtractor {
    text_processor: TextProcessor,
    head_matcher: AhoCorasick,
    generic_skills: HashSet<&'static str>,
    soft_skills: HashSet<&'static str>,
    disallowed_chars: Regex,
    year_regex: Regex,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        let head_matcher = AhoCorasick::new(HEAD_CONCEPTS).map_err(|e| {
            ResumeScorerError::Configuration(format!("Failed to build head concept matcher: {}", e))
        })?;

        let disallowed_chars =
            Regex::new(r"[^a-zA-Z0-9+\-. ]").expect("Invalid phrase character regex");
        let year_regex = Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex");

        Ok(Self {
            text_processor: TextProcessor::new(),
            head_matcher,
            generic_skills: Self::default_generic_skills(),
            soft_skills: Self::default_soft_skills(),
            disallowed_chars,
            year_regex,
        })
    }

    /// Candidate skill phrases from job-description text.
    pub fn extract_job_skills(&self, job_text: &str) -> BTreeSet<String> {
        let mut skills = BTreeSet::new();

        for chunk in self.text_processor.noun_chunks(&job_text.to_lowercase()) {
            let phrase = chunk.trim();

            if phrase.starts_with("a ") || phrase.starts_with("an ") || phrase.starts_with("the ") {
                continue;
            }
            if ROLE_WORDS.iter().any(|role| phrase.contains(role)) {
                continue;
            }
            if EXCLUDED_PHRASE_WORDS.iter().any(|word| phrase.contains(word)) {
                continue;
            }
            if phrase.split_whitespace().count() > MAX_PHRASE_TOKENS
                || phrase.chars().count() < MIN_PHRASE_CHARS
            {
                continue;
            }

            let cleaned = self.disallowed_chars.replace_all(phrase, "");
            if cleaned.trim().is_empty() {
                continue;
            }
            skills.insert(cleaned.into_owned());
        }

        debug!("Extracted {} job skill phrases", skills.len());
        skills
    }

    /// Lower-case, strip filler substrings (even inside other words), collapse whitespace.
    pub fn normalize_skill(&self, skill: &str) -> String {
        let mut normalized = skill.to_lowercase();
        for filler in FILLER_WORDS {
            normalized = normalized.replace(filler, "");
        }
        normalized.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Reduce a normalized phrase to its core concept.
    ///
    /// The highest-priority head concept contained in the phrase wins, wherever
    /// it appears. Otherwise the first non-generic token longer than two
    /// characters is used.
    pub fn canonicalize_skill(&self, normalized: &str) -> Option<String> {
        let head = self
            .head_matcher
            .find_overlapping_iter(normalized)
            .map(|m| m.pattern().as_usize())
            .min();
        if let Some(index) = head {
            return Some(HEAD_CONCEPTS[index].to_string());
        }

        normalized
            .split_whitespace()
            .find(|token| !self.generic_skills.contains(token) && token.chars().count() > 2)
            .map(|token| token.to_string())
    }

    /// Soft skills are never reported as matched or missing.
    pub fn is_soft_skill(&self, canonical: &str) -> bool {
        self.soft_skills.contains(canonical)
    }

    /// Match job skill phrases against whitespace tokens of the resume.
    pub fn extract_resume_features(&self, resume_text: &str, job_skills: &BTreeSet<String>) -> FeatureResult {
        let resume_text = resume_text.to_lowercase();
        let resume_tokens = TextProcessor::whitespace_tokens(&resume_text);

        let mut matched = BTreeSet::new();
        let mut missing = BTreeSet::new();

        for skill in job_skills {
            let normalized = self.normalize_skill(skill);
            let canonical = match self.canonicalize_skill(&normalized) {
                Some(canonical) => canonical,
                None => continue,
            };
            if self.is_soft_skill(&canonical) {
                continue;
            }

            // Any single token is enough.
            if normalized.split_whitespace().any(|token| resume_tokens.contains(token)) {
                matched.insert(canonical);
            } else {
                missing.insert(canonical);
            }
        }

        // The same concept can come from several phrases; matched wins.
        let missing: BTreeSet<String> = missing.difference(&matched).cloned().collect();

        // Denominator is the raw phrase count, not the canonical count.
        let skill_match_ratio = if job_skills.is_empty() {
            0.0
        } else {
            matched.len() as f64 / job_skills.len() as f64
        };

        FeatureResult {
            experience_years: self.estimate_experience(&resume_text),
            matched_skills: matched,
            missing_skills: missing,
            skill_match_ratio,
        }
    }

    /// Number of distinct 19xx/20xx years mentioned.
    pub fn estimate_experience(&self, text: &str) -> u32 {
        let years: HashSet<&str> = self.year_regex.find_iter(text).map(|m| m.as_str()).collect();
        years.len() as u32
    }

    fn default_generic_skills() -> HashSet<&'static str> {
        [
            "data", "system", "systems", "tools", "tool", "process", "processes", "project",
            "projects", "management", "education", "bachelor", "master", "degree",
            "communication", "presentation", "skills", "responsibilities", "experience",
            "work", "analysis", "analytical",
        ]
        .into_iter()
        .collect()
    }

    fn default_soft_skills() -> HashSet<&'static str> {
        [
            "and", "big", "business", "computer", "diverse", "interactive", "messy", "raw",
            "soft", "teamwork", "clear", "efficient", "valuable", "familiarity", "integrity",
            "consistency",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Looking for a data analyst with experience in Python, SQL, \
                       data analysis, statistics, and machine learning.";

    fn skills(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_job_skills() {
        let extractor = SkillExtractor::new().unwrap();
        let extracted = extractor.extract_job_skills(JOB);

        assert_eq!(
            extracted,
            skills(&["data analysis", "machine learning", "python", "sql", "statistics"])
        );
    }

    #[test]
    fn test_phrase_filters() {
        let extractor = SkillExtractor::new().unwrap();
        let extracted = extractor.extract_job_skills(
            "we use the cloud; software engineering; proven ability; \
             very long distributed streaming data pipeline tooling; go; r&d; spark (core)",
        );

        assert!(!extracted.iter().any(|s| s.starts_with("the ")));
        // Role words are matched as substrings.
        assert!(!extracted.contains("software engineering"));
        assert!(!extracted.iter().any(|s| s.contains("ability")));
        assert!(!extracted.iter().any(|s| s.contains("pipeline")));
        assert!(!extracted.contains("go"));
        assert!(extracted.contains("spark"));
        assert!(extracted.contains("core"));
    }

    #[test]
    fn test_disallowed_characters_stripped() {
        let extractor = SkillExtractor::new().unwrap();
        let extracted = extractor.extract_job_skills("solid c++ skills, node.js * and c#-sharp");

        assert!(extracted.contains("solid c++ skills"));
        assert!(extracted.contains("node.js"));
        assert!(extracted.contains("c-sharp"));
    }

    #[test]
    fn test_normalize_skill_naive_substrings() {
        let extractor = SkillExtractor::new().unwrap();

        assert_eq!(extractor.normalize_skill("Strong  SQL   skills"), "sql skills");
        // "non-technical" loses "technical" first.
        assert_eq!(extractor.normalize_skill("non-technical audiences"), "non- audiences");
        // Filler text embedded in a longer word is removed too.
        assert_eq!(extractor.normalize_skill("bitsets"), "bets");
    }

    #[test]
    fn test_canonicalize_priority_order() {
        let extractor = SkillExtractor::new().unwrap();

        assert_eq!(extractor.canonicalize_skill("sql and python").as_deref(), Some("python"));
        assert_eq!(extractor.canonicalize_skill("power bi skills").as_deref(), Some("power bi"));
        assert_eq!(
            extractor.canonicalize_skill("statistics for machine learning").as_deref(),
            Some("statistics")
        );
    }

    #[test]
    fn test_canonicalize_fallback() {
        let extractor = SkillExtractor::new().unwrap();

        assert_eq!(extractor.canonicalize_skill("data pipelines").as_deref(), Some("pipelines"));
        assert_eq!(extractor.canonicalize_skill("r data go"), None);
        assert_eq!(extractor.canonicalize_skill(""), None);
    }

    #[test]
    fn test_scenario_resume_features() {
        let extractor = SkillExtractor::new().unwrap();
        let job_skills = extractor.extract_job_skills(JOB);
        let features = extractor.extract_resume_features("python sql 2020 2021", &job_skills);

        assert!(features.matched_skills.contains("python"));
        assert!(features.matched_skills.contains("sql"));
        assert_eq!(features.experience_years, 2);
        assert!((features.skill_match_ratio - 0.4).abs() < 1e-9);
        assert!(features.missing_skills.contains("statistics"));
    }

    #[test]
    fn test_matched_and_missing_disjoint() {
        let extractor = SkillExtractor::new().unwrap();
        // Both phrases canonicalize to "python"; only one matches.
        let job_skills = skills(&["python scripting", "python automation frameworks"]);
        let features = extractor.extract_resume_features("scripting in bash", &job_skills);

        assert_eq!(features.matched_skills, skills(&["python"]));
        assert!(features.missing_skills.is_empty());
        assert!(features.matched_skills.is_disjoint(&features.missing_skills));
        assert!((features.skill_match_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_soft_skills_and_unresolved_discarded() {
        let extractor = SkillExtractor::new().unwrap();
        let job_skills = skills(&["business acumen", "big data", "data"]);
        let features = extractor.extract_resume_features("nothing relevant", &job_skills);

        assert!(!features.missing_skills.contains("business"));
        assert!(!features.missing_skills.contains("big"));
        assert!(features.matched_skills.is_empty());
        assert!(features.missing_skills.is_empty());
    }

    #[test]
    fn test_empty_job_skills_ratio_zero() {
        let extractor = SkillExtractor::new().unwrap();
        let features = extractor.extract_resume_features("python sql everything", &BTreeSet::new());

        assert_eq!(features.skill_match_ratio, 0.0);
        assert!(features.matched_skills.is_empty());
    }

    #[test]
    fn test_distinct_years() {
        let extractor = SkillExtractor::new().unwrap();

        assert_eq!(extractor.estimate_experience("2019 2019 2020"), 2);
        assert_eq!(extractor.estimate_experience("1999-2003, 12345, 2100, 20201"), 2);
        assert_eq!(extractor.estimate_experience(""), 0);
    }
}
