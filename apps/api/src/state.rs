use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextInference;
use crate::nlu::NluClient;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub llm: Arc<dyn TextInference>,
    /// `None` when no NLU credential was found at startup; the chatbot
    /// endpoint reports this as an error, everything else keeps working.
    pub nlu: Option<Arc<NluClient>>,
    pub config: Config,
}
