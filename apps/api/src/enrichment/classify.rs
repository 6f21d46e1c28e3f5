//! Department Classifier — maps complaint text onto the campus taxonomy.

use crate::enrichment::prompts::{CLASSIFY_PROMPT_TEMPLATE, CLASSIFY_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::TextInference;
use crate::taxonomy::{department_roster, Department};

/// Classifies a complaint into zero or more departments via one LLM call.
///
/// The raw response is treated as a comma-separated list; tokens that do not
/// exactly match a known department are silently dropped. An empty result is
/// valid — downstream steps tolerate unclassified complaints. Transport
/// failures propagate (classification has no fallback).
pub async fn classify_departments(
    llm: &dyn TextInference,
    institute: &str,
    text: &str,
) -> Result<Vec<Department>, AppError> {
    let prompt = CLASSIFY_PROMPT_TEMPLATE
        .replace("{institute}", institute)
        .replace("{complaint}", text)
        .replace("{departments}", &department_roster());

    let response = llm
        .invoke(&prompt, CLASSIFY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Department classification failed: {e}")))?;

    Ok(parse_department_list(&response))
}

/// Splits a raw model response on commas and keeps only exact taxonomy matches.
fn parse_department_list(raw: &str) -> Vec<Department> {
    raw.split(',').filter_map(Department::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_comma_separated_names() {
        let parsed = parse_department_list("Drinking Water, Maintenance");
        assert_eq!(
            parsed,
            vec![Department::DrinkingWater, Department::Maintenance]
        );
    }

    #[test]
    fn test_drops_unrecognized_tokens() {
        let parsed = parse_department_list("Drinking Water, Parking Lot, Maintenance");
        assert_eq!(
            parsed,
            vec![Department::DrinkingWater, Department::Maintenance]
        );
    }

    #[test]
    fn test_tolerates_extra_whitespace() {
        let parsed = parse_department_list("  Library ,  Transport  ");
        assert_eq!(parsed, vec![Department::Library, Department::Transport]);
    }

    #[test]
    fn test_unrelated_prose_yields_empty() {
        assert!(parse_department_list("I cannot classify this complaint.").is_empty());
        assert!(parse_department_list("").is_empty());
    }

    #[test]
    fn test_preserves_model_order_and_duplicates() {
        // Order is the classification order; dedup happens nowhere.
        let parsed = parse_department_list("Maintenance, Drinking Water, Maintenance");
        assert_eq!(
            parsed,
            vec![
                Department::Maintenance,
                Department::DrinkingWater,
                Department::Maintenance
            ]
        );
    }
}
