//! LLM prompts for header mapping and people extraction.
//!
//! Placeholders use `{name}` syntax and are substituted by the render
//! helpers below; the JSON braces in the prompt bodies are literal.

/// Prompt for identifying name/company/email columns in a header row.
pub const MAPPING_PROMPT: &str = r#"You are a data analyst. A user uploaded a spreadsheet with the following column headers.
Identify which header most likely corresponds to the person's full name, which one to the company name or domain, and which one (if any) to an email address.

Headers: {headers}

Rules:
1. Pick headers only from the list above, spelled exactly as given.
2. If you are unsure, pick the most likely ones.
3. Leave a field null when no header fits it.

Output JSON:
{
    "name_header": "header holding the person's full name",
    "company_header": "header holding the company name or domain",
    "email_header": "header holding an email address, or null"
}"#;

/// Prompt for extracting people from event-page text.
pub const EXTRACT_PEOPLE_PROMPT: &str = r#"You are an expert data-extraction agent. Below is the text content of an event website or a page listing participants.
Extract the list of speakers, attendees, participants, or key people from the page.

For each person:
- name: the person's full name
- company: their company or organization
- role: their job title (e.g. CEO, Founder, Senior Engineer)

Rules:
1. If the company or role is not listed next to the name, infer it from context if possible; otherwise use "Unknown" for the company and null for the role.
2. Ignore generic placeholder names like "TBA", "Speaker", or "Moderator".
3. Never invent people who are not on the page.

Output JSON:
{
    "people": [
        { "name": "...", "company": "...", "role": "... or null" }
    ]
}

Page content:
{page_text}"#;

/// Render the mapping prompt for a header list.
pub fn render_mapping_prompt(headers: &[String]) -> String {
    MAPPING_PROMPT.replace("{headers}", &headers.join(", "))
}

/// Render the extraction prompt for page text.
pub fn render_extract_prompt(page_text: &str) -> String {
    EXTRACT_PEOPLE_PROMPT.replace("{page_text}", page_text)
}
