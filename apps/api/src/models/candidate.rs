use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Records written before the enriched fields existed.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;
/// Records carrying `yearsOfExperience` / `educationLevel` / `location`.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Rendered wherever an optional field is absent.
pub const NOT_PROVIDED: &str = "Not provided";

pub type CandidateId = i64;

/// Largest id a stored record may carry: the largest integer a JSON number
/// holds exactly.
pub const MAX_CANDIDATE_ID: CandidateId = (1 << 53) - 1;

/// Highest completed education. The known set is matched case-insensitively;
/// anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationLevel {
    HighSchool,
    Bachelors,
    Masters,
    Phd,
    Other(String),
}

impl EducationLevel {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let level = match trimmed.to_lowercase().as_str() {
            "highschool" => EducationLevel::HighSchool,
            "bachelors" => EducationLevel::Bachelors,
            "masters" => EducationLevel::Masters,
            "phd" => EducationLevel::Phd,
            _ => EducationLevel::Other(trimmed.to_string()),
        };
        Some(level)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EducationLevel::HighSchool => "highschool",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
            EducationLevel::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, EducationLevel::Other(_))
    }

    /// Case-insensitive exact comparison against a filter value.
    pub fn matches(&self, wanted: &str) -> bool {
        self.as_str().to_lowercase() == wanted.trim().to_lowercase()
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EducationLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The fields a structuring pass produces for one resume. This is also the
/// payload the client sends back when it saves a preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    pub skills: Vec<String>,
    #[serde(rename = "experience")]
    pub experience_entries: Vec<String>,
    #[serde(rename = "education")]
    pub education_entries: Vec<String>,
    #[serde(rename = "projects")]
    pub project_entries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CandidateProfile {
    /// True when any field introduced by the enriched schema is present.
    pub fn has_enriched_fields(&self) -> bool {
        self.years_of_experience.is_some()
            || self.education_level.is_some()
            || self.location.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_PROVIDED)
    }

    pub fn display_contact(&self) -> &str {
        self.contact_info.as_deref().unwrap_or(NOT_PROVIDED)
    }

    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or(NOT_PROVIDED)
    }

    pub fn display_education_level(&self) -> &str {
        self.education_level
            .as_ref()
            .map(EducationLevel::as_str)
            .unwrap_or(NOT_PROVIDED)
    }

    pub fn display_years(&self) -> String {
        match self.years_of_experience {
            Some(years) => format!("{years}"),
            None => NOT_PROVIDED.to_string(),
        }
    }
}

/// A persisted candidate. Immutable once created: the only way to change a
/// record is to delete it and insert a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub created_at: DateTime<Utc>,
    pub schema_version: u32,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

impl CandidateRecord {
    pub fn new(id: CandidateId, created_at: DateTime<Utc>, profile: CandidateProfile) -> Self {
        Self {
            id,
            created_at,
            schema_version: CURRENT_SCHEMA_VERSION,
            profile,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.schema_version < CURRENT_SCHEMA_VERSION
    }
}
