use std::collections::BTreeSet;

use crate::models::CandidateRecord;

/// Union of every record's skills, deduplicated by exact string and sorted
/// ascending. Recomputed from the snapshot on every call.
pub fn compute_skill_universe(records: &[CandidateRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.profile.skills.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
