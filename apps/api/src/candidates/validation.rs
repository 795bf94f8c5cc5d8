//! Boundary coercion for candidate JSON.
//!
//! Both model output and stored blobs arrive as untyped JSON. Every field is
//! checked here against the declared record type:
//! - strings are trimmed; blank strings count as absent
//! - list fields take an array (numbers are stringified, other non-strings
//!   dropped) or a single string; missing lists are empty
//! - `yearsOfExperience` takes a non-negative number or a string starting
//!   with one ("5+ years"); anything else is absent, never zero
//! - unknown education levels are kept verbatim

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{
    CandidateId, CandidateProfile, CandidateRecord, EducationLevel, CURRENT_SCHEMA_VERSION,
    LEGACY_SCHEMA_VERSION, MAX_CANDIDATE_ID,
};

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("record has no usable id")]
    MissingId,
}

/// Coerces a JSON object into a profile.
pub fn profile_from_value(value: &Value) -> Result<CandidateProfile, FieldError> {
    let obj = as_object(value)?;

    Ok(CandidateProfile {
        name: text_field(obj, &["name", "fullName"]),
        contact_info: text_field(obj, &["contactInfo", "contact_info", "contact"]),
        skills: list_field(obj, "skills"),
        experience_entries: list_field(obj, "experience"),
        education_entries: list_field(obj, "education"),
        project_entries: list_field(obj, "projects"),
        years_of_experience: years_field(obj),
        education_level: text_field(obj, &["educationLevel", "education_level"])
            .and_then(|raw| EducationLevel::parse(&raw)),
        location: text_field(obj, &["location"]),
    })
}

/// Coerces one stored record. Legacy records (no schema tag, no enriched
/// fields) come back as schema version 1.
pub fn record_from_value(value: &Value) -> Result<CandidateRecord, FieldError> {
    let obj = as_object(value)?;
    let id = id_field(obj).ok_or(FieldError::MissingId)?;
    let profile = profile_from_value(value)?;

    let created_at = text_field(obj, &["createdAt", "timestamp"])
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| Utc.timestamp_millis_opt(id).single())
        .unwrap_or_default();

    let schema_version = obj
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(if profile.has_enriched_fields() {
            CURRENT_SCHEMA_VERSION
        } else {
            LEGACY_SCHEMA_VERSION
        });

    Ok(CandidateRecord {
        id,
        created_at,
        schema_version,
        profile,
    })
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, FieldError> {
    value
        .as_object()
        .ok_or_else(|| FieldError::NotAnObject(json_kind(value)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First key holding a non-blank string wins.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn years_field(obj: &Map<String, Value>) -> Option<f64> {
    let raw = obj
        .get("yearsOfExperience")
        .or_else(|| obj.get("years_of_experience"))?;
    let years = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_number(s)?,
        _ => return None,
    };
    (years.is_finite() && years >= 0.0).then_some(years)
}

/// Parses the numeric prefix of strings like "5", "3.5 years" or "10+".
fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}

/// Ids outside `0..=MAX_CANDIDATE_ID` are unusable, never clamped.
fn id_field(obj: &Map<String, Value>) -> Option<CandidateId> {
    let id = match obj.get("id")? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_CANDIDATE_ID as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (0..=MAX_CANDIDATE_ID).contains(&id).then_some(id)
}
