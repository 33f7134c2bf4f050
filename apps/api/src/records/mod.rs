//! Read-only access to candidate and job rows.
//!
//! Handlers hold an `Arc<dyn RecordSource>` so the Postgres backend can be
//! swapped for an in-memory one in tests.

pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;

pub use postgres::PgRecordSource;

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Open postings of one company, oldest first.
    async fn open_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobRecord>, AppError>;

    /// Every open posting, oldest first.
    async fn open_jobs(&self) -> Result<Vec<JobRecord>, AppError>;

    /// Active candidate profiles, oldest first.
    async fn candidate_pool(&self) -> Result<Vec<CandidateRecord>, AppError>;

    async fn candidate(&self, candidate_id: Uuid) -> Result<Option<CandidateRecord>, AppError>;
}
