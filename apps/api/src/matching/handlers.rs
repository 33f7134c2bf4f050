//! Axum route handlers for the Matching API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::policy::MatchPolicy;
use crate::matching::ranking::{rank_candidates, MatchResult};
use crate::matching::recommend::{recommend_jobs, JobMatch};
use crate::matching::scoring::{round_score, score_breakdown, ScoreBreakdown};
use crate::models::candidate::{CandidatePayload, CandidateRecord};
use crate::models::job::{JobPayload, JobRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    #[serde(default)]
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub job_filter: JobFilter,
    pub candidates: Vec<CandidatePayload>,
    pub jobs: Vec<JobPayload>,
}

/// Ranked matches plus a candidate id → score lookup for the same entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankResponse {
    pub matches: Vec<MatchResult>,
    pub scores: BTreeMap<Uuid, u32>,
}

impl RankResponse {
    pub fn from_matches(matches: Vec<MatchResult>) -> Self {
        let scores = matches
            .iter()
            .map(|m| (m.candidate_id, m.match_score))
            .collect();
        Self { matches, scores }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub candidate: CandidatePayload,
    pub job: JobPayload,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyMatchesQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub candidate_id: Uuid,
    pub jobs: Vec<JobMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_candidates(payloads: Vec<CandidatePayload>) -> Result<Vec<CandidateRecord>, AppError> {
    payloads
        .into_iter()
        .enumerate()
        .map(|(i, payload)| payload.into_record(i))
        .collect()
}

fn validate_jobs(payloads: Vec<JobPayload>) -> Result<Vec<JobRecord>, AppError> {
    payloads
        .into_iter()
        .enumerate()
        .map(|(i, payload)| payload.into_record(i))
        .collect()
}

/// Keeps jobs of the requested company. Jobs without a company are kept;
/// no filter keeps everything.
fn scope_jobs(jobs: Vec<JobRecord>, filter: &JobFilter) -> Vec<JobRecord> {
    match filter.company_id {
        Some(company_id) => jobs
            .into_iter()
            .filter(|job| job.posting.company_id.map_or(true, |id| id == company_id))
            .collect(),
        None => jobs,
    }
}

fn rank(candidates: &[CandidateRecord], jobs: &[JobRecord], policy: &MatchPolicy) -> RankResponse {
    RankResponse::from_matches(rank_candidates(candidates, jobs, policy))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches/rank
///
/// Ranks the supplied candidates against the supplied jobs.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let candidates = validate_candidates(request.candidates)?;
    let jobs = scope_jobs(validate_jobs(request.jobs)?, &request.job_filter);

    let response = rank(&candidates, &jobs, state.policy());
    info!(
        "Ranked {} candidates against {} jobs: {} matches",
        candidates.len(),
        jobs.len(),
        response.matches.len()
    );
    Ok(Json(response))
}

/// POST /api/v1/matches/score
///
/// Scores a single candidate/job pair and returns the per-factor breakdown.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let candidate = request.candidate.into_record(0)?;
    let job = request.job.into_record(0)?;

    let breakdown = score_breakdown(&candidate, &job, state.policy());
    Ok(Json(ScoreResponse {
        candidate_id: candidate.id,
        job_id: job.id,
        score: round_score(breakdown.total),
        breakdown,
    }))
}

/// GET /api/v1/companies/:company_id/matches
///
/// Cache-or-fetch: serves the cached ranking unless `refresh=true`, otherwise
/// loads the company's open jobs and the candidate pool, ranks and caches.
/// Cache failures are logged and treated as a miss.
pub async fn handle_company_matches(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(params): Query<CompanyMatchesQuery>,
) -> Result<Json<RankResponse>, AppError> {
    if !params.refresh {
        match state.cache.get(company_id).await {
            Ok(Some(cached)) => return Ok(Json(cached)),
            Ok(None) => {}
            Err(e) => warn!("Match cache read failed for company {company_id}: {e}"),
        }
    }

    let jobs = state.records.open_jobs_for_company(company_id).await?;
    let candidates = state.records.candidate_pool().await?;
    let response = rank(&candidates, &jobs, state.policy());

    info!(
        "Ranked {} candidates for company {company_id} ({} open jobs): {} matches",
        candidates.len(),
        jobs.len(),
        response.matches.len()
    );

    if let Err(e) = state.cache.put(company_id, &response).await {
        warn!("Match cache write failed for company {company_id}: {e}");
    }

    Ok(Json(response))
}

/// DELETE /api/v1/companies/:company_id/matches/cache
pub async fn handle_invalidate_company_matches(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.cache.invalidate(company_id).await?;
    info!("Invalidated match cache for company {company_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/candidates/:candidate_id/job-recommendations
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let candidate = state
        .records
        .candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    let jobs = state.records.open_jobs().await?;

    Ok(Json(RecommendationsResponse {
        candidate_id,
        jobs: recommend_jobs(&candidate, &jobs, state.policy()),
    }))
}
