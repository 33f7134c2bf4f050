//! Candidate ↔ job compatibility scoring.
//!
//! The score is a weighted sum of four independent factors, each normalized
//! to `[0, 1]` first:
//!
//! | factor     | full credit                                           |
//! |------------|-------------------------------------------------------|
//! | skills     | every required skill present (case-insensitive)       |
//! | experience | candidate's years inside the job level's band         |
//! | location   | locations equal or one contains the other             |
//! | job type   | job type among the candidate's preferred types        |
//!
//! Missing fields fit 0.0. The weighted total is clamped to `[0, 100]`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::experience::experience_fit;
use crate::matching::policy::MatchPolicy;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;

/// One factor's normalized fit and the points it adds to the total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FactorScore {
    pub fit: f64,    // 0.0 – 1.0
    pub points: f64, // fit × weight
}

impl FactorScore {
    fn new(fit: f64, weight: f64) -> Self {
        let fit = if fit.is_nan() { 0.0 } else { fit.clamp(0.0, 1.0) };
        Self {
            fit,
            points: fit * weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub skills: FactorScore,
    pub experience: FactorScore,
    pub location: FactorScore,
    pub job_type: FactorScore,
    /// Clamped to `[0, 100]`.
    pub total: f64,
}

/// Scores one candidate against one job. Pure; never fails on data shape.
pub fn score_match(candidate: &CandidateRecord, job: &JobRecord, policy: &MatchPolicy) -> f64 {
    score_breakdown(candidate, job, policy).total
}

pub fn score_breakdown(
    candidate: &CandidateRecord,
    job: &JobRecord,
    policy: &MatchPolicy,
) -> ScoreBreakdown {
    let profile = &candidate.profile;
    let posting = &job.posting;
    let weights = &policy.weights;

    let skills = FactorScore::new(
        skill_overlap(&posting.skills_required, &profile.skills),
        weights.skills,
    );
    let experience = FactorScore::new(
        experience_fit(
            profile.experience_years,
            posting.experience_level.as_deref(),
            policy.experience_falloff_years,
        ),
        weights.experience,
    );
    let location = FactorScore::new(
        location_fit(
            profile.current_location.as_deref(),
            posting.location.as_deref(),
            profile.willing_to_relocate,
            policy.relocation_credit,
        ),
        weights.location,
    );
    let job_type = FactorScore::new(
        job_type_fit(posting.job_type.as_deref(), &profile.preferred_job_types),
        weights.job_type,
    );

    let total = clamp_score(skills.points + experience.points + location.points + job_type.points);

    ScoreBreakdown {
        skills,
        experience,
        location,
        job_type,
        total,
    }
}

/// Clamps to `[0, 100]`; NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Clamped score rounded to the nearest integer.
pub fn round_score(score: f64) -> u32 {
    clamp_score(score).round() as u32
}

/// Trims and lowercases; `None` for blank input.
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn normalize_set(values: &[String]) -> HashSet<String> {
    values.iter().filter_map(|v| normalize(v)).collect()
}

/// Fraction of distinct required skills the candidate has. No requirements → 0.0.
pub fn skill_overlap(required: &[String], candidate_skills: &[String]) -> f64 {
    let required = normalize_set(required);
    if required.is_empty() {
        return 0.0;
    }
    let have = normalize_set(candidate_skills);
    let matched = required.iter().filter(|skill| have.contains(*skill)).count();
    matched as f64 / required.len() as f64
}

/// 1.0 when the locations match, `relocation_credit` when the candidate would
/// move, 0.0 otherwise. Two locations match when, trimmed and lowercased, they
/// are equal or one contains the other ("Berlin" matches "Berlin, Germany").
pub fn location_fit(
    candidate_location: Option<&str>,
    job_location: Option<&str>,
    willing_to_relocate: bool,
    relocation_credit: f64,
) -> f64 {
    let same_place = match (
        candidate_location.and_then(normalize),
        job_location.and_then(normalize),
    ) {
        (Some(here), Some(there)) => here.contains(&there) || there.contains(&here),
        _ => false,
    };

    if same_place {
        1.0
    } else if willing_to_relocate {
        relocation_credit
    } else {
        0.0
    }
}

pub fn job_type_fit(job_type: Option<&str>, preferred: &[String]) -> f64 {
    match job_type.and_then(normalize) {
        Some(wanted) if normalize_set(preferred).contains(&wanted) => 1.0,
        _ => 0.0,
    }
}
