//! Officer Brief Generator — fixed-format internal summary line.

use crate::taxonomy::Department;

/// Renders the one-line brief shown to complaint officers. Pure templating,
/// no LLM call; an empty department list gets a generic routing phrase.
pub fn render_officer_brief(summary: &str, severity: u8, departments: &[Department]) -> String {
    let dept_str = if departments.is_empty() {
        "relevant department".to_string()
    } else {
        departments
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "A student complaint has been received regarding {summary}. \
        It is rated {severity}/5 in severity and forwarded to the {dept_str} department(s)."
    )
}
