//! Text enrichment functions — one prompt each, strict response parsing,
//! documented fallbacks. Severity and suggestions recover internally;
//! classification and summarization propagate failures to the pipeline.

pub mod brief;
pub mod classify;
pub mod prompts;
pub mod severity;
pub mod suggestions;
pub mod summarize;
