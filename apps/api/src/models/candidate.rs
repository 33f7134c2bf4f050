use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    /// A range needs both bounds with `min <= max`; anything else is no range.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) if min <= max => Some(Self { min, max }),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct SalaryBounds {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Partial or inverted ranges deserialize as `None` instead of failing.
fn lenient_salary_range<'de, D>(deserializer: D) -> Result<Option<SalaryRange>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SalaryBounds>::deserialize(deserializer)?
        .and_then(|bounds| SalaryRange::from_bounds(bounds.min, bounds.max)))
}

/// Everything a candidate profile carries apart from its identifier.
/// Every field is optional on the wire; missing or `null` values take the
/// defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CandidateProfile {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub experience_years: Option<f64>,
    pub current_location: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub willing_to_relocate: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_job_types: Vec<String>,
    #[serde(deserialize_with = "lenient_salary_range")]
    pub target_salary_range: Option<SalaryRange>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated candidate: identifier present, profile fields defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

/// Candidate as received over HTTP, before the identifier check.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

impl CandidatePayload {
    pub fn into_record(self, position: usize) -> Result<CandidateRecord, AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::Validation(format!("candidates[{position}] is missing an id"))
        })?;
        Ok(CandidateRecord {
            id,
            profile: self.profile,
        })
    }
}
