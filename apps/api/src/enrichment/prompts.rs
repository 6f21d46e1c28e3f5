// All LLM prompt constants for the enrichment module.
// Templates use `{placeholder}` slots filled with `str::replace` before sending.

/// System prompt for department classification — names only, comma-separated.
pub const CLASSIFY_SYSTEM: &str = "You are a campus complaint triage assistant. \
    Respond with department names from the provided list only, \
    as a comma-separated list. Do NOT add explanations.";

/// Classification prompt template.
/// Replace: {institute}, {complaint}, {departments}
pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"Given this complaint by a student at {institute}:
{complaint}
Classify it into one or more of the following campus departments:
{departments}.
Return only department names as a comma-separated list."#;

/// System prompt for severity scoring — a single digit, nothing else.
pub const SEVERITY_SYSTEM: &str = "You are a campus complaint triage assistant. \
    Respond with a single digit from 1 to 5 and nothing else.";

/// Severity prompt template.
/// Replace: {institute}, {complaint}
pub const SEVERITY_PROMPT_TEMPLATE: &str = r#"You are an assistant for {institute}'s complaint system.
Analyze the following student complaint and rate its SEVERITY from 1 to 5:

1 - Very minor inconvenience or suggestion
2 - Minor issue, can wait
3 - Moderate issue, causes discomfort but not urgent
4 - Serious problem, needs quick attention
5 - Critical or safety issue, requires immediate response

Complaint: "{complaint}"

Return ONLY a single digit (1-5) as the severity score."#;

/// System prompt shared by both summarization passes.
pub const SUMMARIZE_SYSTEM: &str = "You are a concise summarizer for a campus \
    complaint system. Respond with the summary text only.";

/// Map step: summarize one chunk of a long complaint.
/// Replace: {chunk}
pub const SUMMARIZE_CHUNK_PROMPT_TEMPLATE: &str = r#"Write a concise summary of the following student complaint excerpt:

{chunk}

CONCISE SUMMARY:"#;

/// Reduce step: combine partial chunk summaries into one.
/// Replace: {summaries}
pub const SUMMARIZE_COMBINE_PROMPT_TEMPLATE: &str = r#"The following are partial summaries of one student complaint:

{summaries}

Combine them into a single concise summary of the complaint.

CONCISE SUMMARY:"#;

/// System prompt for interim suggestions — short bulleted advice.
pub const SUGGESTION_SYSTEM: &str = "You are a helpful campus administrator. \
    Respond with 3-4 short bulleted suggestions, one per line, \
    each starting with '- '. Do NOT add any other text.";

/// Interim suggestion prompt template.
/// Replace: {institute}, {complaint}, {department}
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"You are an {institute} administrator assisting students with complaints.

Complaint:
{complaint}

Department Concerned:
{department}

Give 3-4 short, realistic, and actionable suggestions a student can follow
while their complaint is being reviewed by the {department} department.
Keep the tone polite, supportive, and student-friendly. Avoid generic or repetitive advice.
Begin each suggestion with a bullet like '- '."#;
