// Prompt fragments shared by every LLM-backed feature.
// Feature-specific prompts live in a prompts.rs next to the feature.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Reminder appended to anything that hands statistics to the model.
pub const NO_GUARANTEE_INSTRUCTION: &str = "\
    Lottery draws are independent random events. Past frequencies do not change \
    future odds. Never claim or imply that a combination is more likely to win.";
