// Cross-cutting prompt fragments. Feature-specific prompts live next to the
// code that sends them (see recommendation/prompts.rs).

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Shared scoring rules for every prompt that fills in the trait template.
pub const SCORING_RULES: &str = "\
    Rules:\n\
    - Return every category and every key of the template, and no other keys.\n\
    - Every value is a number between 0 and 1.\n\
    - A higher value means stronger relevance; use 0 when there is no evidence.";

/// Low temperature for scoring so repeated runs stay close.
pub const SCORING_TEMPERATURE: f32 = 0.2;
/// Higher temperature for question generation so each session gets new questions.
pub const QUESTION_TEMPERATURE: f32 = 0.9;
