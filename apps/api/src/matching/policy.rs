use serde::{Deserialize, Serialize};

pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 20.0;
pub const DEFAULT_RESULT_CAP: usize = 50;
pub const DEFAULT_RELOCATION_CREDIT: f64 = 0.5;
pub const DEFAULT_EXPERIENCE_FALLOFF_YEARS: f64 = 5.0;

/// Points each factor contributes at a perfect fit.
/// Skills carry the largest share.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub job_type: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            experience: 25.0,
            location: 20.0,
            job_type: 15.0,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.job_type
    }
}

/// Tunables for scoring and ranking. Defaults are the contractual values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchPolicy {
    /// Candidates whose best score is below this are dropped.
    pub relevance_threshold: f64,
    pub result_cap: usize,
    /// Location fit granted to a candidate who would relocate.
    pub relocation_credit: f64,
    /// Years outside the level band at which experience fit reaches zero.
    pub experience_falloff_years: f64,
    pub weights: MatchWeights,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            result_cap: DEFAULT_RESULT_CAP,
            relocation_credit: DEFAULT_RELOCATION_CREDIT,
            experience_falloff_years: DEFAULT_EXPERIENCE_FALLOFF_YEARS,
            weights: MatchWeights::default(),
        }
    }
}

impl MatchPolicy {
    /// Checks the invariants the scorer relies on. Returns a message naming
    /// the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.relevance_threshold) {
            return Err(format!(
                "relevance_threshold must be within 0..=100, got {}",
                self.relevance_threshold
            ));
        }
        if self.result_cap == 0 {
            return Err("result_cap must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.relocation_credit) {
            return Err(format!(
                "relocation_credit must be within 0..=1, got {}",
                self.relocation_credit
            ));
        }
        if !self.experience_falloff_years.is_finite() || self.experience_falloff_years <= 0.0 {
            return Err(format!(
                "experience_falloff_years must be positive, got {}",
                self.experience_falloff_years
            ));
        }
        let w = &self.weights;
        for (name, value) in [
            ("skills", w.skills),
            ("experience", w.experience),
            ("location", w.location),
            ("job_type", w.job_type),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("weight '{name}' must be a non-negative number, got {value}"));
            }
        }
        if w.sum() <= 0.0 {
            return Err("weights must not all be zero".to_string());
        }
        if w.skills < w.experience.max(w.location).max(w.job_type) {
            return Err("skills must carry the largest weight".to_string());
        }
        Ok(())
    }
}
