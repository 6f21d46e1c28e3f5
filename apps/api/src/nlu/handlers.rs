//! Axum route handler for the chatbot NLU endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub text: String,
    /// Omitted by anonymous chats; a fresh session is generated per request
    /// so concurrent users never share NLU context.
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub fulfillment_text: String,
    pub intent: String,
    pub confidence: f32,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// POST /dialogflow/message
pub async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(nlu) = state.nlu.as_ref() else {
        return Err(AppError::Nlu("Dialogflow not initialized".to_string()));
    };

    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text field is required".to_string()));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let matched = nlu
        .detect_intent(&session_id, text)
        .await
        .map_err(|e| AppError::Nlu(e.to_string()))?;

    info!("Dialogflow response: {}", matched.fulfillment_text);

    Ok(Json(MessageResponse {
        fulfillment_text: matched.fulfillment_text,
        intent: matched.intent,
        confidence: matched.confidence,
        session_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_missing_session_id() {
        let request: MessageRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(request.text, "hi");
        assert!(request.session_id.is_none());
    }

    #[test]
    fn test_request_reads_camel_case_session_id() {
        let request: MessageRequest =
            serde_json::from_str(r#"{"text": "hi", "sessionId": "abc-123"}"#).unwrap();
        assert_eq!(request.session_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_response_serializes_session_id_camel_case() {
        let response = MessageResponse {
            fulfillment_text: "Hello!".to_string(),
            intent: "greeting".to_string(),
            confidence: 0.9,
            session_id: "abc".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["sessionId"], "abc");
        assert_eq!(value["fulfillment_text"], "Hello!");
    }
}
