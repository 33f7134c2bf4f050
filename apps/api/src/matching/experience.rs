use serde::{Deserialize, Serialize};

/// Seniority ladder for job postings. Ordering follows the ladder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    /// Parses a free-form level label. Returns `None` for anything unrecognised.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "entry" | "entry-level" | "junior" | "intern" | "graduate" => Some(Self::Entry),
            "mid" | "mid-level" | "intermediate" => Some(Self::Mid),
            "senior" | "senior-level" => Some(Self::Senior),
            "lead" | "principal" | "staff" => Some(Self::Lead),
            "executive" | "director" => Some(Self::Executive),
            _ => None,
        }
    }

    /// Years-of-experience band `[min, max)`. `None` means open-ended.
    pub fn years_band(self) -> (f64, Option<f64>) {
        match self {
            Self::Entry => (0.0, Some(2.0)),
            Self::Mid => (2.0, Some(5.0)),
            Self::Senior => (5.0, Some(8.0)),
            Self::Lead => (8.0, Some(12.0)),
            Self::Executive => (12.0, None),
        }
    }

    /// Years between `years` and the nearest edge of this level's band; 0 inside.
    pub fn distance_from_band(self, years: f64) -> f64 {
        let (min, max) = self.years_band();
        if years < min {
            min - years
        } else {
            match max {
                Some(max) if years >= max => years - max,
                _ => 0.0,
            }
        }
    }
}

/// Normalized experience fit in `[0, 1]`.
///
/// 1.0 inside the band, decreasing linearly to 0.0 once the candidate is
/// `falloff_years` outside it. Missing, negative or non-finite years and
/// unknown levels fit 0.0.
pub fn experience_fit(years: Option<f64>, level: Option<&str>, falloff_years: f64) -> f64 {
    let Some(years) = years.filter(|y| y.is_finite() && *y >= 0.0) else {
        return 0.0;
    };
    let Some(level) = level.and_then(ExperienceLevel::from_label) else {
        return 0.0;
    };
    if falloff_years <= 0.0 {
        return if level.distance_from_band(years) == 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - level.distance_from_band(years) / falloff_years).clamp(0.0, 1.0)
}
