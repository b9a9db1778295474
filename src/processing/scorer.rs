//! Weighted aggregation of similarity, skill coverage and experience

use serde::{Deserialize, Serialize};

pub const SIMILARITY_WEIGHT: f64 = 0.5;
pub const SKILL_WEIGHT: f64 = 0.3;
pub const EXPERIENCE_WEIGHT: f64 = 0.2;

/// Experience beyond this many years adds nothing.
pub const EXPERIENCE_CAP_YEARS: f64 = 10.0;

/// Per-component contributions to the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub similarity_component: f64,
    pub skill_component: f64,
    pub experience_component: f64,
}

impl ScoreBreakdown {
    pub fn new(similarity: f64, skill_match_ratio: f64, experience_years: u32) -> Self {
        let experience = (f64::from(experience_years) / EXPERIENCE_CAP_YEARS).min(1.0);
        Self {
            similarity_component: SIMILARITY_WEIGHT * similarity,
            skill_component: SKILL_WEIGHT * skill_match_ratio,
            experience_component: EXPERIENCE_WEIGHT * experience,
        }
    }

    pub fn total(&self) -> f64 {
        self.similarity_component + self.skill_component + self.experience_component
    }
}

/// `0.5·similarity + 0.3·skill_match_ratio + 0.2·min(years/10, 1)`.
///
/// Inputs are not clamped: out-of-range similarity or ratio passes through.
pub fn compute_final_score(similarity: f64, skill_match_ratio: f64, experience_years: u32) -> f64 {
    ScoreBreakdown::new(similarity, skill_match_ratio, experience_years).total()
}
