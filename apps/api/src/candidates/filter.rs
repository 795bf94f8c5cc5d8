//! Candidate views: pure predicates over a `list()` snapshot.
//!
//! Every query re-filters the full snapshot with a linear scan; there is no
//! index. Predicates combine with AND, so the order they run in does not
//! change the result.

use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::CandidateRecord;

/// Years-of-experience band. Boundaries: entry ≤ 2 < mid ≤ 5 < senior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceBand {
    #[default]
    All,
    Entry,
    Mid,
    Senior,
}

impl ExperienceBand {
    /// `All` accepts records without the field; every other band rejects them.
    pub fn contains(self, years: Option<f64>) -> bool {
        match (self, years) {
            (ExperienceBand::All, _) => true,
            (_, None) => false,
            (ExperienceBand::Entry, Some(y)) => y <= 2.0,
            (ExperienceBand::Mid, Some(y)) => y > 2.0 && y <= 5.0,
            (ExperienceBand::Senior, Some(y)) => y > 5.0,
        }
    }
}

impl FromStr for ExperienceBand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(ExperienceBand::All),
            "entry" => Ok(ExperienceBand::Entry),
            "mid" => Ok(ExperienceBand::Mid),
            "senior" => Ok(ExperienceBand::Senior),
            other => Err(AppError::Validation(format!(
                "experience must be one of all, entry, mid, senior (got '{other}')"
            ))),
        }
    }
}

pub fn matches_search(record: &CandidateRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map(|v| v.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };
    contains(&record.profile.name) || contains(&record.profile.contact_info)
}

/// Exact, case-sensitive membership of every required skill.
pub fn matches_skills(record: &CandidateRecord, required: &[String]) -> bool {
    required
        .iter()
        .all(|skill| record.profile.skills.iter().any(|s| s == skill))
}

/// `None` or "all" accepts everything.
pub fn matches_education(record: &CandidateRecord, level: Option<&str>) -> bool {
    match level.map(str::trim) {
        None => true,
        Some(wanted) if wanted.is_empty() || wanted.eq_ignore_ascii_case("all") => true,
        Some(wanted) => record
            .profile
            .education_level
            .as_ref()
            .map(|l| l.matches(wanted))
            .unwrap_or(false),
    }
}

pub fn matches_location(record: &CandidateRecord, substring: &str) -> bool {
    let needle = substring.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .profile
        .location
        .as_deref()
        .map(|l| l.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

pub fn filter_by_search(records: Vec<CandidateRecord>, query: &str) -> Vec<CandidateRecord> {
    records.into_iter().filter(|r| matches_search(r, query)).collect()
}

pub fn filter_by_skills(
    records: Vec<CandidateRecord>,
    required: &[String],
) -> Vec<CandidateRecord> {
    records
        .into_iter()
        .filter(|r| matches_skills(r, required))
        .collect()
}

pub fn filter_by_experience_band(
    records: Vec<CandidateRecord>,
    band: ExperienceBand,
) -> Vec<CandidateRecord> {
    records
        .into_iter()
        .filter(|r| band.contains(r.profile.years_of_experience))
        .collect()
}

pub fn filter_by_education(
    records: Vec<CandidateRecord>,
    level: Option<&str>,
) -> Vec<CandidateRecord> {
    records
        .into_iter()
        .filter(|r| matches_education(r, level))
        .collect()
}

pub fn filter_by_location(records: Vec<CandidateRecord>, substring: &str) -> Vec<CandidateRecord> {
    records
        .into_iter()
        .filter(|r| matches_location(r, substring))
        .collect()
}

/// All active predicates, ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateFilter {
    pub query: String,
    pub required_skills: Vec<String>,
    pub experience: ExperienceBand,
    pub education: Option<String>,
    pub location: String,
}

impl CandidateFilter {
    pub fn apply(&self, records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        let records = filter_by_search(records, &self.query);
        let records = filter_by_skills(records, &self.required_skills);
        let records = filter_by_experience_band(records, self.experience);
        let records = filter_by_education(records, self.education.as_deref());
        filter_by_location(records, &self.location)
    }
}

/// Splits a comma separated skills parameter, dropping blanks.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, EducationLevel};
    use chrono::{TimeZone, Utc};

    fn record(id: i64, profile: CandidateProfile) -> CandidateRecord {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        CandidateRecord::new(id, created_at, profile)
    }

    fn with_years(id: i64, years: Option<f64>) -> CandidateRecord {
        record(
            id,
            CandidateProfile {
                years_of_experience: years,
                ..Default::default()
            },
        )
    }

    fn ids(records: &[CandidateRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn people() -> Vec<CandidateRecord> {
        vec![
            record(
                1,
                CandidateProfile {
                    name: Some("Alice Zhang".into()),
                    contact_info: Some("alice@example.com".into()),
                    skills: vec!["Go".into(), "SQL".into()],
                    years_of_experience: Some(1.0),
                    education_level: Some(EducationLevel::Bachelors),
                    location: Some("Berlin, Germany".into()),
                    ..Default::default()
                },
            ),
            record(
                2,
                CandidateProfile {
                    name: Some("Bob Smith".into()),
                    contact_info: Some("+1 555 0100".into()),
                    skills: vec!["Go".into(), "Rust".into()],
                    years_of_experience: Some(4.0),
                    education_level: Some(EducationLevel::Masters),
                    location: Some("Austin, TX".into()),
                    ..Default::default()
                },
            ),
            record(
                3,
                CandidateProfile {
                    name: Some("Carol".into()),
                    contact_info: None,
                    skills: vec!["Rust".into()],
                    years_of_experience: Some(8.0),
                    education_level: Some(EducationLevel::Other("Bootcamp".into())),
                    location: None,
                    ..Default::default()
                },
            ),
            record(4, CandidateProfile::default()),
        ]
    }

    #[test]
    fn test_search_matches_name_or_contact_case_insensitively() {
        assert_eq!(ids(&filter_by_search(people(), "  ALICE ")), vec![1]);
        assert_eq!(ids(&filter_by_search(people(), "555")), vec![2]);
        assert_eq!(ids(&filter_by_search(people(), "example.COM")), vec![1]);
        assert!(filter_by_search(people(), "nobody").is_empty());
    }

    #[test]
    fn test_empty_search_is_identity() {
        assert_eq!(filter_by_search(people(), ""), people());
        assert_eq!(filter_by_search(people(), "   "), people());
    }

    #[test]
    fn test_search_results_always_contain_query() {
        for query in ["a", "o", "smith", "@", "zz"] {
            for r in filter_by_search(people(), query) {
                let q = query.to_lowercase();
                let hit = r.profile.name.as_deref().unwrap_or("").to_lowercase().contains(&q)
                    || r
                        .profile
                        .contact_info
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&q);
                assert!(hit, "record {} should not match '{query}'", r.id);
            }
        }
    }

    #[test]
    fn test_skills_requires_every_skill_exactly() {
        let required = vec!["Go".to_string(), "Rust".to_string()];
        assert_eq!(ids(&filter_by_skills(people(), &required)), vec![2]);

        let lowercase = vec!["go".to_string()];
        assert!(filter_by_skills(people(), &lowercase).is_empty());
    }

    #[test]
    fn test_empty_skills_matches_everything() {
        assert_eq!(filter_by_skills(people(), &[]), people());
    }

    #[test]
    fn test_adding_required_skills_never_increases_matches() {
        let sequence = ["Go", "Rust", "SQL", "Haskell"];
        let mut required = Vec::new();
        let mut previous = filter_by_skills(people(), &required).len();
        for skill in sequence {
            required.push(skill.to_string());
            let current = filter_by_skills(people(), &required).len();
            assert!(current <= previous, "{required:?} grew matches");
            previous = current;
        }
    }

    #[test]
    fn test_experience_band_scenario_mid_returns_only_b() {
        let records = vec![
            with_years(1, Some(1.0)),
            with_years(2, Some(4.0)),
            with_years(3, Some(8.0)),
        ];
        assert_eq!(
            ids(&filter_by_experience_band(records, ExperienceBand::Mid)),
            vec![2]
        );
    }

    #[test]
    fn test_experience_band_boundaries() {
        let records = vec![
            with_years(1, Some(2.0)),
            with_years(2, Some(2.5)),
            with_years(3, Some(5.0)),
            with_years(4, Some(5.1)),
            with_years(5, None),
        ];
        assert_eq!(
            ids(&filter_by_experience_band(records.clone(), ExperienceBand::Entry)),
            vec![1]
        );
        assert_eq!(
            ids(&filter_by_experience_band(records.clone(), ExperienceBand::Mid)),
            vec![2, 3]
        );
        assert_eq!(
            ids(&filter_by_experience_band(records.clone(), ExperienceBand::Senior)),
            vec![4]
        );
        assert_eq!(
            ids(&filter_by_experience_band(records, ExperienceBand::All)),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_experience_band_parsing() {
        assert_eq!("Senior".parse::<ExperienceBand>().unwrap(), ExperienceBand::Senior);
        assert_eq!("".parse::<ExperienceBand>().unwrap(), ExperienceBand::All);
        assert!("principal".parse::<ExperienceBand>().is_err());
    }

    #[test]
    fn test_education_filter() {
        assert_eq!(ids(&filter_by_education(people(), Some("MASTERS"))), vec![2]);
        assert_eq!(ids(&filter_by_education(people(), Some("bootcamp"))), vec![3]);
        assert_eq!(filter_by_education(people(), Some("all")), people());
        assert_eq!(filter_by_education(people(), None), people());
        assert!(filter_by_education(people(), Some("phd")).is_empty());
    }

    #[test]
    fn test_location_filter() {
        assert_eq!(ids(&filter_by_location(people(), "berlin")), vec![1]);
        assert_eq!(ids(&filter_by_location(people(), "TX")), vec![2]);
        assert_eq!(filter_by_location(people(), ""), people());
    }

    #[test]
    fn test_missing_location_never_matches_non_empty_filter() {
        let results = filter_by_location(people(), "a");
        assert!(results.iter().all(|r| r.profile.location.is_some()));
        assert!(!ids(&results).contains(&3));
        assert!(!ids(&results).contains(&4));
    }

    #[test]
    fn test_composite_filter_is_order_independent() {
        let skills = vec!["Go".to_string()];
        let a = filter_by_location(
            filter_by_experience_band(filter_by_skills(people(), &skills), ExperienceBand::Mid),
            "austin",
        );
        let b = filter_by_skills(
            filter_by_location(
                filter_by_experience_band(people(), ExperienceBand::Mid),
                "austin",
            ),
            &skills,
        );
        let composite = CandidateFilter {
            required_skills: skills.clone(),
            experience: ExperienceBand::Mid,
            location: "austin".into(),
            ..Default::default()
        }
        .apply(people());

        assert_eq!(ids(&a), vec![2]);
        assert_eq!(a, b);
        assert_eq!(a, composite);
    }

    #[test]
    fn test_default_filter_matches_everything() {
        assert_eq!(CandidateFilter::default().apply(people()), people());
    }

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(parse_skill_list(" Go, ,SQL ,"), vec!["Go", "SQL"]);
        assert!(parse_skill_list("").is_empty());
    }
}
