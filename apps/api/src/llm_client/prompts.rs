// Shared prompt constants.
// Each module that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts that read resume text.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    Use only facts present in the resume text. \
    If a field is not stated, return null for scalars and [] for lists. \
    Never guess names, contact details or dates.";
