//! Candidate-side view: which open jobs suit one candidate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::policy::MatchPolicy;
use crate::matching::ranking::select_top;
use crate::matching::scoring::{round_score, score_breakdown, ScoreBreakdown};
use crate::models::candidate::CandidateRecord;
use crate::models::job::{JobPosting, JobRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobMatch {
    pub job_id: Uuid,
    #[serde(flatten)]
    pub posting: JobPosting,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

/// Scores every job for `candidate` and returns the relevant ones, best first.
/// Uses the same threshold, ordering and cap as candidate ranking.
pub fn recommend_jobs(
    candidate: &CandidateRecord,
    jobs: &[JobRecord],
    policy: &MatchPolicy,
) -> Vec<JobMatch> {
    let scored: Vec<_> = jobs
        .iter()
        .map(|job| {
            let breakdown = score_breakdown(candidate, job, policy);
            let total = breakdown.total;
            ((job, breakdown), total)
        })
        .collect();

    select_top(scored, policy)
        .into_iter()
        .map(|((job, breakdown), total)| JobMatch {
            job_id: job.id,
            posting: job.posting.clone(),
            score: round_score(total),
            breakdown,
        })
        .collect()
}
