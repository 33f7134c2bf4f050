use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::null_as_default;

/// Job posting fields used for matching and echoed back in results.
/// Missing or `null` values take the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JobPosting {
    pub company_id: Option<Uuid>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills_required: Vec<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    /// Raw label ("entry", "mid", "senior", "lead", "executive").
    /// Unknown labels are kept as-is and score zero on experience.
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub posting: JobPosting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub posting: JobPosting,
}

impl JobPayload {
    pub fn into_record(self, position: usize) -> Result<JobRecord, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::Validation(format!("jobs[{position}] is missing an id")))?;
        Ok(JobRecord {
            id,
            posting: self.posting,
        })
    }
}
