// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; cross-cutting pieces live here.

/// Closing instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
