pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Inline scoring: caller supplies the records
        .route("/api/v1/matches/rank", post(handlers::handle_rank))
        .route("/api/v1/matches/score", post(handlers::handle_score))
        // Stored records: fetched through the record source
        .route(
            "/api/v1/companies/:company_id/matches",
            get(handlers::handle_company_matches),
        )
        .route(
            "/api/v1/companies/:company_id/matches/cache",
            delete(handlers::handle_invalidate_company_matches),
        )
        .route(
            "/api/v1/candidates/:candidate_id/job-recommendations",
            get(handlers::handle_job_recommendations),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::cache::{CacheError, MatchCache, NoopMatchCache};
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::matching::handlers::RankResponse;
    use crate::matching::policy::MatchPolicy;
    use crate::models::candidate::{CandidateProfile, CandidateRecord};
    use crate::models::job::{JobPosting, JobRecord};
    use crate::records::RecordSource;

    #[derive(Default)]
    struct InMemoryRecords {
        jobs: Vec<JobRecord>,
        candidates: Vec<CandidateRecord>,
        pool_fetches: AtomicUsize,
    }

    #[async_trait]
    impl RecordSource for InMemoryRecords {
        async fn open_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobRecord>, AppError> {
            Ok(self
                .jobs
                .iter()
                .filter(|j| j.posting.company_id == Some(company_id))
                .cloned()
                .collect())
        }

        async fn open_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
            Ok(self.jobs.clone())
        }

        async fn candidate_pool(&self) -> Result<Vec<CandidateRecord>, AppError> {
            self.pool_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }

        async fn candidate(&self, candidate_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
            Ok(self.candidates.iter().find(|c| c.id == candidate_id).cloned())
        }
    }

    #[derive(Default)]
    struct InMemoryCache {
        entries: Mutex<HashMap<Uuid, RankResponse>>,
    }

    #[async_trait]
    impl MatchCache for InMemoryCache {
        async fn get(&self, company_id: Uuid) -> Result<Option<RankResponse>, CacheError> {
            Ok(self.entries.lock().unwrap().get(&company_id).cloned())
        }

        async fn put(&self, company_id: Uuid, response: &RankResponse) -> Result<(), CacheError> {
            self.entries
                .lock()
                .unwrap()
                .insert(company_id, response.clone());
            Ok(())
        }

        async fn invalidate(&self, company_id: Uuid) -> Result<(), CacheError> {
            self.entries.lock().unwrap().remove(&company_id);
            Ok(())
        }
    }

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            database_max_connections: 1,
            redis_url: None,
            match_cache_ttl_secs: 60,
            port: 0,
            rust_log: "debug".to_string(),
            match_policy: MatchPolicy::default(),
        }
    }

    fn app(records: Arc<InMemoryRecords>, cache: Arc<dyn MatchCache>) -> Router {
        build_router(AppState {
            config: test_config(),
            records,
            cache,
        })
    }

    fn rust_job(company_id: Uuid) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            posting: JobPosting {
                company_id: Some(company_id),
                title: "Rust Engineer".to_string(),
                skills_required: vec!["rust".to_string()],
                location: Some("Berlin".to_string()),
                job_type: Some("full-time".to_string()),
                experience_level: Some("mid".to_string()),
            },
        }
    }

    fn rustacean() -> CandidateRecord {
        CandidateRecord {
            id: Uuid::new_v4(),
            profile: CandidateProfile {
                full_name: Some("Alex Example".to_string()),
                experience_years: Some(3.0),
                current_location: Some("Berlin".to_string()),
                preferred_job_types: vec!["full-time".to_string()],
                skills: vec!["Rust".to_string()],
                ..CandidateProfile::default()
            },
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_rank_inline_records() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let strong = Uuid::new_v4();
        let weak = Uuid::new_v4();
        let job_id = Uuid::new_v4();

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/rank",
                json!({
                    "job_filter": {},
                    "candidates": [
                        { "id": weak, "preferred_job_types": ["part-time"] },
                        {
                            "id": strong,
                            "headline": "Full-stack developer",
                            "skills": ["react", "node", "sql"],
                            "experience_years": 4,
                            "current_location": "Berlin",
                            "willing_to_relocate": false,
                            "preferred_job_types": ["full-time"]
                        }
                    ],
                    "jobs": [{
                        "id": job_id,
                        "title": "Full-stack Engineer",
                        "skills_required": ["react", "node"],
                        "experience_level": "mid",
                        "location": "Berlin",
                        "job_type": "full-time"
                    }]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["candidate_id"], strong.to_string());
        assert_eq!(matches[0]["match_score"], 100);
        assert_eq!(matches[0]["headline"], "Full-stack developer");
        assert_eq!(matches[0]["best_job_match"]["job_id"], job_id.to_string());
        assert_eq!(body["scores"][strong.to_string()], 100);
        assert!(body["scores"].get(weak.to_string()).is_none());
    }

    #[tokio::test]
    async fn test_rank_with_no_jobs_is_empty() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/rank",
                json!({ "candidates": [{ "id": Uuid::new_v4() }], "jobs": [] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"], json!([]));
    }

    #[tokio::test]
    async fn test_rank_accepts_null_profile_fields() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let candidate_id = Uuid::new_v4();
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/rank",
                json!({
                    "candidates": [{
                        "id": candidate_id,
                        "skills": null,
                        "languages": null,
                        "willing_to_relocate": null,
                        "experience_years": 4,
                        "current_location": "Berlin",
                        "preferred_job_types": ["full-time"],
                        "target_salary_range": { "min": 50000 }
                    }],
                    "jobs": [{
                        "id": Uuid::new_v4(),
                        "title": null,
                        "skills_required": ["rust"],
                        "experience_level": "mid",
                        "location": "Berlin",
                        "job_type": "full-time"
                    }]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["candidate_id"], candidate_id.to_string());
        assert_eq!(matches[0]["match_score"], 60);
        assert_eq!(matches[0]["skills"], json!([]));
        assert_eq!(matches[0]["target_salary_range"], Value::Null);
    }

    #[tokio::test]
    async fn test_rank_rejects_job_without_id() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/rank",
                json!({ "candidates": [], "jobs": [{ "title": "No id" }] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rank_scopes_jobs_to_company() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let ours = Uuid::new_v4();
        let candidate = rustacean();
        let other_company_job = rust_job(Uuid::new_v4());

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/rank",
                json!({
                    "job_filter": { "company_id": ours },
                    "candidates": [candidate],
                    "jobs": [other_company_job]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"], json!([]));
    }

    #[tokio::test]
    async fn test_score_pair_returns_breakdown() {
        let app = app(Arc::default(), Arc::new(NoopMatchCache));
        let mut candidate = rustacean();
        candidate.profile.current_location = Some("Hamburg".to_string());
        candidate.profile.willing_to_relocate = true;

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/matches/score",
                json!({ "candidate": candidate, "job": rust_job(Uuid::new_v4()) }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 90);
        assert_eq!(body["breakdown"]["location"]["fit"], 0.5);
    }

    #[tokio::test]
    async fn test_company_matches_are_cached_until_refresh() {
        let company_id = Uuid::new_v4();
        let records = Arc::new(InMemoryRecords {
            jobs: vec![rust_job(company_id)],
            candidates: vec![rustacean()],
            ..InMemoryRecords::default()
        });
        let cache: Arc<dyn MatchCache> = Arc::new(InMemoryCache::default());
        let uri = format!("/api/v1/companies/{company_id}/matches");

        let (status, first) = send(app(records.clone(), cache.clone()), get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["matches"].as_array().unwrap().len(), 1);

        let (_, second) = send(app(records.clone(), cache.clone()), get_request(&uri)).await;
        assert_eq!(first, second);
        assert_eq!(records.pool_fetches.load(Ordering::SeqCst), 1);

        let refresh = format!("{uri}?refresh=true");
        send(app(records.clone(), cache.clone()), get_request(&refresh)).await;
        assert_eq!(records.pool_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_clears_company_cache() {
        let company_id = Uuid::new_v4();
        let records = Arc::new(InMemoryRecords {
            jobs: vec![rust_job(company_id)],
            candidates: vec![rustacean()],
            ..InMemoryRecords::default()
        });
        let cache: Arc<dyn MatchCache> = Arc::new(InMemoryCache::default());
        let uri = format!("/api/v1/companies/{company_id}/matches");

        send(app(records.clone(), cache.clone()), get_request(&uri)).await;
        let (status, _) = send(
            app(records.clone(), cache.clone()),
            Request::builder()
                .method("DELETE")
                .uri(format!("{uri}/cache"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        send(app(records.clone(), cache.clone()), get_request(&uri)).await;
        assert_eq!(records.pool_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_recommendations_for_known_candidate() {
        let candidate = rustacean();
        let records = Arc::new(InMemoryRecords {
            jobs: vec![rust_job(Uuid::new_v4())],
            candidates: vec![candidate.clone()],
            ..InMemoryRecords::default()
        });
        let (status, body) = send(
            app(records, Arc::new(NoopMatchCache)),
            get_request(&format!(
                "/api/v1/candidates/{}/job-recommendations",
                candidate.id
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"][0]["title"], "Rust Engineer");
        assert_eq!(body["jobs"][0]["score"], 100);
    }

    #[tokio::test]
    async fn test_recommendations_for_unknown_candidate_is_404() {
        let (status, body) = send(
            app(Arc::default(), Arc::new(NoopMatchCache)),
            get_request(&format!(
                "/api/v1/candidates/{}/job-recommendations",
                Uuid::new_v4()
            )),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
