//! Single-record download: the JSON record or a Markdown summary.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::models::{CandidateRecord, NOT_PROVIDED};

const DEFAULT_EXPORT_NAME: &str = "candidate";

/// `<Name_With_Underscores>_profile.<ext>`; `candidate_profile.<ext>` when
/// the record has no name.
pub fn export_file_name(record: &CandidateRecord, extension: &str) -> String {
    let base = record
        .profile
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
                .replace(['"', '/', '\\'], "_")
        })
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());
    format!("{base}_profile.{extension}")
}

fn push_list(md: &mut String, title: &str, items: &[String]) {
    md.push_str(&format!("## {title}\n\n"));
    if items.is_empty() {
        md.push_str(&format!("{NOT_PROVIDED}\n\n"));
        return;
    }
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

pub fn render_profile_md(record: &CandidateRecord) -> String {
    let profile = &record.profile;
    let mut md = format!("# {}\n\n", profile.display_name());
    md.push_str(&format!("- **Contact:** {}\n", profile.display_contact()));
    md.push_str(&format!("- **Location:** {}\n", profile.display_location()));
    md.push_str(&format!(
        "- **Years of experience:** {}\n",
        profile.display_years()
    ));
    md.push_str(&format!(
        "- **Education level:** {}\n",
        profile.display_education_level()
    ));
    md.push_str(&format!(
        "- **Added:** {}\n\n",
        record.created_at.format("%Y-%m-%d")
    ));

    let skills = if profile.skills.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        profile.skills.join(", ")
    };
    md.push_str(&format!("## Skills\n\n{skills}\n\n"));
    push_list(&mut md, "Experience", &profile.experience_entries);
    push_list(&mut md, "Education", &profile.education_entries);
    push_list(&mut md, "Projects", &profile.project_entries);
    md
}

/// Wraps a body as an attachment download.
pub fn download_response(body: String, file_name: &str, content_type: &'static str) -> Response {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, EducationLevel};
    use chrono::{TimeZone, Utc};

    fn record(profile: CandidateProfile) -> CandidateRecord {
        CandidateRecord::new(
            1_700_000_000_000,
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            profile,
        )
    }

    #[test]
    fn test_export_file_name_replaces_spaces() {
        let r = record(CandidateProfile {
            name: Some("Ada  Lovelace King".into()),
            ..Default::default()
        });
        assert_eq!(export_file_name(&r, "json"), "Ada_Lovelace_King_profile.json");
    }

    #[test]
    fn test_export_file_name_defaults_without_name() {
        let r = record(CandidateProfile::default());
        assert_eq!(export_file_name(&r, "json"), "candidate_profile.json");

        let blank = record(CandidateProfile {
            name: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(export_file_name(&blank, "md"), "candidate_profile.md");
    }

    #[test]
    fn test_export_file_name_strips_header_breaking_characters() {
        let r = record(CandidateProfile {
            name: Some("A \"B\" C/D".into()),
            ..Default::default()
        });
        assert_eq!(export_file_name(&r, "json"), "A__B__C_D_profile.json");
    }

    #[test]
    fn test_markdown_renders_not_provided_for_absent_fields() {
        let md = render_profile_md(&record(CandidateProfile {
            name: Some("Lin".into()),
            skills: vec!["Go".into(), "Rust".into()],
            ..Default::default()
        }));
        assert!(md.starts_with("# Lin\n"));
        assert!(md.contains("- **Location:** Not provided"));
        assert!(md.contains("- **Years of experience:** Not provided"));
        assert!(md.contains("Go, Rust"));
        assert!(md.contains("## Projects\n\nNot provided"));
    }

    #[test]
    fn test_markdown_renders_enriched_fields() {
        let md = render_profile_md(&record(CandidateProfile {
            years_of_experience: Some(3.5),
            education_level: Some(EducationLevel::Phd),
            location: Some("Lisbon".into()),
            experience_entries: vec!["Engineer at X".into()],
            ..Default::default()
        }));
        assert!(md.starts_with("# Not provided\n"));
        assert!(md.contains("- **Years of experience:** 3.5"));
        assert!(md.contains("- **Education level:** phd"));
        assert!(md.contains("- Engineer at X\n"));
        assert!(md.contains("- **Added:** 2023-11-14"));
    }

    #[test]
    fn test_download_response_sets_attachment_headers() {
        let response = download_response("{}".into(), "x_profile.json", "application/json");
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"x_profile.json\""
        );
    }
}
