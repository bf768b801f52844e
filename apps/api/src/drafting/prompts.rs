// Prompt constants for outreach drafting.
// Reuses the plain-text system fragment from llm_client::prompts.

/// Drafting prompt. Fill `{recipient}`, `{sender}` and `{goal}` with `fill_template`.
/// `{sender}` and `{goal}` may be replaced with empty strings.
pub const MESSAGE_PROMPT_TEMPLATE: &str = r#"Generate a professional, warm, and concise LinkedIn networking message (2-3 paragraphs, under 200 words) to connect with this person:

RECIPIENT:
{recipient}
{sender}{goal}
The message should:
- Start with a personalized opener referencing something specific about the recipient's work
- Clearly articulate what value the sender brings: relevant experience, skills, or shared interests that make this connection mutually beneficial
- Position the sender as someone who can contribute, not just someone who wants something
- Find genuine common ground between the sender's background and the recipient's work
- Match the tone and intent described in the NETWORKING GOAL and TONE GUIDANCE above
- Be conversational but professional, not overly formal or salesy
- End with a soft call to action (e.g., "Would love to exchange ideas sometime")
- NOT include a subject line, just the message body
- Feel authentic and human, not templated
- Keep it under 150 words, busy professionals appreciate brevity"#;

/// Recipient block. Replace every `{field}` placeholder.
pub const RECIPIENT_TEMPLATE: &str = "Name: {name}
Title: {title}
Company: {company}
Headline: {headline}
About: {summary}
Mutual connections: {mutual_connections}";

/// Sender block, only included when the user has a profile.
pub const SENDER_TEMPLATE: &str = "
ABOUT THE SENDER (you are writing on behalf of this person):
Name: {name}
Title: {title}
Company: {company}
Headline: {headline}
Background: {summary}
";

/// Goal block, only included when a goal was chosen.
pub const GOAL_TEMPLATE: &str = "
NETWORKING GOAL: {label}
TONE GUIDANCE: {hint}
";

/// Substitutes `{key}` placeholders in one pass over `template`.
///
/// Inserted values are never rescanned, so a profile field that happens to
/// contain `{sender}` is kept literally. Unknown placeholders are left as is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find_map(|(key, value)| {
            tail.strip_prefix(*key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);

    out
}
