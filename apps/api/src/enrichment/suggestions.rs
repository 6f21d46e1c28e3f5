//! Interim Suggestion Generator — per-department advice while a complaint
//! waits in the queue. Falls back to generic guidance on any failure, so the
//! pipeline never loses a record to a bad suggestion call.

use tracing::warn;

use crate::enrichment::prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};
use crate::llm_client::TextInference;
use crate::taxonomy::Department;

/// Per-department cap on suggestions.
pub const MAX_SUGGESTIONS: usize = 4;
/// Lines at or below this length are parsing noise, not suggestions.
const MIN_SUGGESTION_LEN: usize = 3;

/// Generic guidance used when the model yields nothing usable.
const FALLBACK_SUGGESTIONS: [&str; 2] = [
    "Please wait while the department reviews your complaint.",
    "You may follow up politely if no response within a few days.",
];

/// Asks for 3-4 actionable suggestions for one department. Infallible:
/// an empty parse or any transport failure yields the generic fallback pair.
pub async fn interim_suggestions(
    llm: &dyn TextInference,
    institute: &str,
    text: &str,
    department: Department,
) -> Vec<String> {
    let prompt = SUGGESTION_PROMPT_TEMPLATE
        .replace("{institute}", institute)
        .replace("{complaint}", text)
        .replace("{department}", department.name());

    match llm.invoke(&prompt, SUGGESTION_SYSTEM).await {
        Ok(response) => {
            let parsed = parse_suggestions(&response);
            if parsed.is_empty() {
                warn!("No usable suggestions for {department}, using fallback");
                fallback_suggestions()
            } else {
                parsed
            }
        }
        Err(e) => {
            warn!("Suggestion call failed for {department} ({e}), using fallback");
            fallback_suggestions()
        }
    }
}

fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

/// Splits a response on line breaks, strips bullet markers and whitespace,
/// drops fragments, and truncates to the per-department cap.
fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_start_matches(['-', '•', '*', ' ']).trim())
        .filter(|line| line.len() > MIN_SUGGESTION_LEN)
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
