pub mod candidate;

pub use candidate::{
    CandidateId, CandidateProfile, CandidateRecord, EducationLevel, CURRENT_SCHEMA_VERSION,
    LEGACY_SCHEMA_VERSION, MAX_CANDIDATE_ID, NOT_PROVIDED,
};
