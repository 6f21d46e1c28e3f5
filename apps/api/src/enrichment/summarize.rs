//! Summarizer — map-reduce summarization over bounded, overlapping chunks.
//!
//! Long complaints are split into overlapping chunks; each chunk is
//! summarized independently (map, concurrently), and the partial summaries
//! are combined with one final call (reduce). Short inputs degenerate to a
//! single map call. Unlike severity scoring there is no fallback here: a
//! failed summarization fails the whole pipeline run.

use futures::future::join_all;

use crate::enrichment::prompts::{
    SUMMARIZE_CHUNK_PROMPT_TEMPLATE, SUMMARIZE_COMBINE_PROMPT_TEMPLATE, SUMMARIZE_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::TextInference;

/// Target chunk length in characters.
pub const CHUNK_SIZE: usize = 500;
/// Characters shared between consecutive chunks.
pub const CHUNK_OVERLAP: usize = 50;

/// Produces one condensed summary of the complaint text.
pub async fn summarize_text(llm: &dyn TextInference, text: &str) -> Result<String, AppError> {
    let chunks = chunk_text(text, CHUNK_SIZE, CHUNK_OVERLAP);

    let map_calls = chunks.iter().map(|chunk| {
        let prompt = SUMMARIZE_CHUNK_PROMPT_TEMPLATE.replace("{chunk}", chunk);
        async move { llm.invoke(&prompt, SUMMARIZE_SYSTEM).await }
    });

    let mut partials = Vec::with_capacity(chunks.len());
    for result in join_all(map_calls).await {
        let partial = result.map_err(|e| AppError::Llm(format!("Summarization failed: {e}")))?;
        partials.push(partial.trim().to_string());
    }

    if partials.len() == 1 {
        return Ok(partials.remove(0));
    }

    let combine_prompt = SUMMARIZE_COMBINE_PROMPT_TEMPLATE.replace("{summaries}", &partials.join("\n\n"));
    let combined = llm
        .invoke(&combine_prompt, SUMMARIZE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Summary combination failed: {e}")))?;

    Ok(combined.trim().to_string())
}

/// Splits text into chunks of at most `chunk_size` characters, consecutive
/// chunks sharing `chunk_overlap` characters. Prefers breaking at the last
/// whitespace inside the window so words stay intact. Operates on character
/// counts, not bytes.
pub(crate) fn chunk_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    assert!(chunk_overlap < chunk_size, "overlap must leave forward progress");

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let hard_end = (start + chunk_size).min(chars.len());

        // Break at the last whitespace in the window unless this is the tail.
        let end = if hard_end < chars.len() {
            match chars[start..hard_end].iter().rposition(|c| c.is_whitespace()) {
                Some(pos) if pos > chunk_overlap => start + pos,
                _ => hard_end,
            }
        } else {
            hard_end
        };

        chunks.push(chars[start..end].iter().collect::<String>().trim().to_string());

        if end == chars.len() {
            break;
        }
        start = end.saturating_sub(chunk_overlap);
    }

    chunks.retain(|c| !c.is_empty());
    chunks
}
