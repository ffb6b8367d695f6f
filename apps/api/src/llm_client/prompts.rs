// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file only holds cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps generated content grounded in the supplied profile.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim you write must be traceable to the profile provided. \
    Do NOT infer, interpolate, or invent employers, dates, degrees, or metrics. \
    If the profile does not support a claim, omit it entirely.";
