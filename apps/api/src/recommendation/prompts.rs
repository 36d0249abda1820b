// LLM prompts for the recommendation collaborator.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role line; `JSON_ONLY_SYSTEM` is appended at call time.
pub const RECOMMENDATION_SYSTEM_ROLE: &str =
    "You are a lottery number analyst for a 6/45 lottery. \
    You turn draw statistics into candidate number sets with a short rationale for each.";

/// Replace `{narrative}`, `{set_count}`, `{include_rule}`, `{exclude_rule}`
/// and `{no_guarantee}` before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Recent draw statistics:

{narrative}

Using these statistics, propose {set_count} different sets of numbers.

Rules for every set:
- Exactly 6 numbers.
- Each number between 1 and 45 inclusive.
- No number repeated within a set.
- No two sets identical.
- {include_rule}
- {exclude_rule}

Explain in one or two sentences per set how the statistics shaped it
(frequency, unseen numbers, sum range, even:odd balance).

{no_guarantee}

Return a JSON object with this EXACT schema (no extra fields):
{
  "sets": [
    {"numbers": [3, 11, 19, 27, 34, 42], "rationale": "..."}
  ]
}"#;
