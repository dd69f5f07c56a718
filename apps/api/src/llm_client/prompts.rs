// Shared prompt fragments.
// Operation-specific prompts live in `assist/prompts.rs`.

/// Appended to every free-text prompt so the reply can be inserted into a form as-is.
pub const STRICT_OUTPUT_RULE: &str = "\n\nCRITICAL RULE: Your reply must contain ONLY the requested text. \
    Do not include introductions, preambles, summaries, pleasantries, Markdown, asterisks (*), \
    hashes (#), or any other formatting or explanatory text. \
    The output must be direct and ready to paste into a form.";

/// Appended to JSON-mode prompts.
pub const JSON_ONLY_RULE: &str = "\n\nCRITICAL RULE: Reply ONLY with the JSON object described by the schema. \
    Do not include introductory text, explanations, or Markdown.";

/// Shared instruction for line-oriented list fields.
pub const BULLET_FORMAT: &str = "Each item must start on a new line with a dash and a space ('- ').";
