//! Employer-side ranking: each candidate's best job among a set of postings,
//! thresholded, sorted and capped.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::matching::policy::MatchPolicy;
use crate::matching::scoring::{round_score, score_match};
use crate::models::candidate::{CandidateProfile, CandidateRecord};
use crate::models::job::JobRecord;

/// The job a candidate fits best, with that job's own rounded score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestJobMatch {
    pub job_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub score: u32,
}

impl BestJobMatch {
    fn new(job: &JobRecord, score: f64) -> Self {
        Self {
            job_id: job.id,
            title: job.posting.title.clone(),
            location: job.posting.location.clone(),
            job_type: job.posting.job_type.clone(),
            experience_level: job.posting.experience_level.clone(),
            score: round_score(score),
        }
    }
}

/// One ranked candidate. Profile fields are carried through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub candidate_id: Uuid,
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub match_score: u32, // 0 – 100
    /// Mean score across every job. Informational; not used for ranking.
    pub average_score: f64,
    pub best_job_match: Option<BestJobMatch>,
}

/// Scores of one candidate across a job set.
#[derive(Debug, Clone)]
pub struct CandidateEvaluation<'a> {
    pub best_job: Option<&'a JobRecord>,
    pub best_score: f64,
    pub average_score: f64,
}

/// Scores `candidate` against every job. The first job with the strictly
/// highest score wins; a best score of zero leaves `best_job` empty.
pub fn evaluate_candidate<'a>(
    candidate: &CandidateRecord,
    jobs: &'a [JobRecord],
    policy: &MatchPolicy,
) -> CandidateEvaluation<'a> {
    let mut best_job = None;
    let mut best_score = 0.0_f64;
    let mut total = 0.0_f64;

    for job in jobs {
        let score = score_match(candidate, job, policy);
        total += score;
        if score > best_score {
            best_score = score;
            best_job = Some(job);
        }
    }

    let average_score = if jobs.is_empty() {
        0.0
    } else {
        total / jobs.len() as f64
    };

    CandidateEvaluation {
        best_job,
        best_score,
        average_score,
    }
}

/// Ranks candidates by their best fit among `jobs`.
///
/// Returns an empty list when `jobs` is empty. Candidates below the relevance
/// threshold are dropped; the rest are sorted by descending rounded score
/// (stable, so equal scores keep input order) and capped.
pub fn rank_candidates(
    candidates: &[CandidateRecord],
    jobs: &[JobRecord],
    policy: &MatchPolicy,
) -> Vec<MatchResult> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let evaluated: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            let evaluation = evaluate_candidate(candidate, jobs, policy);
            let score = evaluation.best_score;
            ((candidate, evaluation), score)
        })
        .collect();

    let ranked = select_top(evaluated, policy);

    debug!(
        "Ranked {} of {} candidates against {} jobs",
        ranked.len(),
        candidates.len(),
        jobs.len()
    );

    ranked
        .into_iter()
        .map(|((candidate, evaluation), score)| MatchResult {
            candidate_id: candidate.id,
            profile: candidate.profile.clone(),
            match_score: round_score(score),
            average_score: evaluation.average_score,
            best_job_match: evaluation
                .best_job
                .map(|job| BestJobMatch::new(job, evaluation.best_score)),
        })
        .collect()
}

/// Threshold → stable descending sort on rounded score → cap.
pub(crate) fn select_top<T>(scored: Vec<(T, f64)>, policy: &MatchPolicy) -> Vec<(T, f64)> {
    let mut kept: Vec<_> = scored
        .into_iter()
        .filter(|(_, score)| *score >= policy.relevance_threshold)
        .collect();
    // `sort_by_key` is stable.
    kept.sort_by_key(|(_, score)| std::cmp::Reverse(round_score(*score)));
    kept.truncate(policy.result_cap);
    kept
}
