// Cross-cutting prompt fragments. Assistant-specific prompts live in assistant/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps answers tied to the portfolio observations.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only state facts that appear in the portfolio context or observations you were given. \
    Do NOT invent clients, dates, metrics, or certifications. \
    If the context does not answer the question, say so and suggest a related topic.";
