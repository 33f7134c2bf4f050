use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, CandidateRecord, SalaryRange};
use crate::models::job::{JobPosting, JobRecord};
use crate::records::RecordSource;

const CANDIDATE_COLUMNS: &str = r#"
    id, full_name, headline, summary, experience_years, current_location,
    willing_to_relocate, preferred_job_types, target_salary_min, target_salary_max,
    skills, languages, created_at, updated_at
"#;

const JOB_COLUMNS: &str = r#"
    id, company_id, title, skills_required, location, job_type, experience_level
"#;

#[derive(Debug, Clone, FromRow)]
struct CandidateRow {
    id: Uuid,
    full_name: Option<String>,
    headline: Option<String>,
    summary: Option<String>,
    experience_years: Option<f64>,
    current_location: Option<String>,
    willing_to_relocate: Option<bool>,
    preferred_job_types: Option<Vec<String>>,
    target_salary_min: Option<f64>,
    target_salary_max: Option<f64>,
    skills: Option<Vec<String>>,
    languages: Option<Vec<String>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        let target_salary_range =
            SalaryRange::from_bounds(row.target_salary_min, row.target_salary_max);

        CandidateRecord {
            id: row.id,
            profile: CandidateProfile {
                full_name: row.full_name,
                headline: row.headline,
                summary: row.summary,
                experience_years: row.experience_years,
                current_location: row.current_location,
                willing_to_relocate: row.willing_to_relocate.unwrap_or(false),
                preferred_job_types: row.preferred_job_types.unwrap_or_default(),
                target_salary_range,
                skills: row.skills.unwrap_or_default(),
                languages: row.languages.unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct JobRow {
    id: Uuid,
    company_id: Option<Uuid>,
    title: Option<String>,
    skills_required: Option<Vec<String>>,
    location: Option<String>,
    job_type: Option<String>,
    experience_level: Option<String>,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        JobRecord {
            id: row.id,
            posting: JobPosting {
                company_id: row.company_id,
                title: row.title.unwrap_or_default(),
                skills_required: row.skills_required.unwrap_or_default(),
                location: row.location,
                job_type: row.job_type,
                experience_level: row.experience_level,
            },
        }
    }
}

/// `RecordSource` over the marketplace's `candidate_profiles` and
/// `job_postings` tables.
#[derive(Clone)]
pub struct PgRecordSource {
    pool: PgPool,
}

impl PgRecordSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn open_jobs_for_company(&self, company_id: Uuid) -> Result<Vec<JobRecord>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings
             WHERE company_id = $1 AND status = 'open'
             ORDER BY created_at, id"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} open jobs for company {company_id}", rows.len());
        Ok(rows.into_iter().map(JobRecord::from).collect())
    }

    async fn open_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings
             WHERE status = 'open'
             ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobRecord::from).collect())
    }

    async fn candidate_pool(&self) -> Result<Vec<CandidateRecord>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidate_profiles
             WHERE is_active
             ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} candidate profiles", rows.len());
        Ok(rows.into_iter().map(CandidateRecord::from).collect())
    }

    async fn candidate(&self, candidate_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidate_profiles WHERE id = $1"
        ))
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CandidateRecord::from))
    }
}
