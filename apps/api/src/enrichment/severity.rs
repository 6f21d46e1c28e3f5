//! Severity Scorer — two-tier scoring that can never fail.
//!
//! Primary path: ask the model for a single digit and take the leading digit
//! characters of the response. Every failure — unparseable output, empty
//! response, transport error, timeout — falls back to a keyword heuristic
//! over the raw text. The heuristic is total, so the scorer always returns a
//! value in [1,5] and the pipeline never stalls on an unscorable complaint.

use tracing::warn;

use crate::enrichment::prompts::{SEVERITY_PROMPT_TEMPLATE, SEVERITY_SYSTEM};
use crate::llm_client::TextInference;

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 5;

/// How many leading characters of the model response are scanned for digits.
const DIGIT_SCAN_WINDOW: usize = 5;

/// Crisis or safety language — immediate response required.
const CRISIS_KEYWORDS: &[&str] = &[
    "urgent",
    "immediate",
    "emergency",
    "fire",
    "danger",
    "broken",
    "water leakage",
    "power cut",
];

/// Concrete problem language — needs quick attention.
const PROBLEM_KEYWORDS: &[&str] = &[
    "bad", "poor", "problem", "issue", "slow", "leak", "complaint",
];

/// Mild friction or delay language.
const DELAY_KEYWORDS: &[&str] = &["inconvenience", "delay", "not working", "not available"];

/// Scores a complaint's severity in [1,5]. Infallible by construction.
pub async fn score_severity(llm: &dyn TextInference, institute: &str, text: &str) -> u8 {
    let prompt = SEVERITY_PROMPT_TEMPLATE
        .replace("{institute}", institute)
        .replace("{complaint}", text);

    let score = match llm.invoke(&prompt, SEVERITY_SYSTEM).await {
        Ok(response) => match extract_score(&response) {
            Some(score) => score,
            None => {
                warn!("Severity response had no usable digit, using keyword heuristic");
                keyword_severity(text)
            }
        },
        Err(e) => {
            warn!("Severity scoring call failed ({e}), using keyword heuristic");
            keyword_severity(text)
        }
    };

    score.clamp(MIN_SEVERITY, MAX_SEVERITY)
}

/// Concatenates the digit characters among the first few characters of the
/// response and parses them. `None` when no digits appear or they parse to 0.
fn extract_score(response: &str) -> Option<u8> {
    let digits: String = response
        .chars()
        .take(DIGIT_SCAN_WINDOW)
        .filter(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n.min(MAX_SEVERITY as u32) as u8),
    }
}

/// Keyword-tier estimate over the lowercased text. Total: always in [2,5].
pub(crate) fn keyword_severity(text: &str) -> u8 {
    let t = text.to_lowercase();
    if CRISIS_KEYWORDS.iter().any(|k| t.contains(k)) {
        5
    } else if PROBLEM_KEYWORDS.iter().any(|k| t.contains(k)) {
        4
    } else if DELAY_KEYWORDS.iter().any(|k| t.contains(k)) {
        3
    } else {
        2
    }
}
