// Shared prompt fragments. Each service that drafts text keeps its own
// prompts.rs alongside it and reuses these.

/// System prompt for plain-prose output (no markdown, no preamble).
pub const PLAIN_TEXT_SYSTEM: &str = "You write short professional correspondence. \
    Respond with the message body only. \
    Do NOT use markdown formatting. \
    Do NOT add a preamble, a subject line, or explanations.";
