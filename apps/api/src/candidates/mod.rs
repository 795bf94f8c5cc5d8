// Candidate store views and the single-resume pipeline:
// upload → extraction → structuring preview → save → list / filter / export.

pub mod export;
pub mod filter;
pub mod handlers;
pub mod prompts;
pub mod skills;
pub mod structuring;
pub mod validation;
