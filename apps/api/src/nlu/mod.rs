//! Conversational-NLU client — Dialogflow `detectIntent` over REST.
//!
//! The credential is a Google service-account key resolved once at startup.
//! Initialization failure disables the chatbot endpoint but must never take
//! the rest of the service down, so `main` holds the client as an `Option`.

pub mod handlers;

use std::path::PathBuf;

use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const DIALOGFLOW_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const LANGUAGE_CODE: &str = "en-US";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum NluError {
    #[error("service account key not found (looked in {0})")]
    CredentialNotFound(String),

    #[error("service account key has no project_id")]
    MissingProjectId,

    #[error("service account key unreadable: {0}")]
    CredentialRead(#[from] std::io::Error),

    #[error("service account key malformed: {0}")]
    CredentialParse(#[from] serde_json::Error),

    #[error("credential error: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One detected intent, as returned to the chatbot frontend.
#[derive(Debug, Clone)]
pub struct IntentMatch {
    pub fulfillment_text: String,
    pub intent: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Debug, Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    #[serde(default)]
    query_result: QueryResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QueryResult {
    fulfillment_text: String,
    intent: Intent,
    intent_detection_confidence: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Intent {
    display_name: String,
}

/// The slice of a service-account key file this service reads directly.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    project_id: Option<String>,
}

/// Dialogflow sessions client, constructed once at startup and shared.
#[derive(Debug)]
pub struct NluClient {
    client: Client,
    credentials: CustomServiceAccount,
    project_id: String,
}

impl NluClient {
    /// Loads the service-account key and extracts the project id.
    /// Looks at the configured path first, then the working directory, then
    /// the parent directory.
    pub fn initialize(configured_path: &str) -> Result<Self, NluError> {
        let candidates = [
            PathBuf::from(configured_path),
            PathBuf::from("service_account.json"),
            PathBuf::from("../service_account.json"),
        ];
        let key_path = candidates
            .iter()
            .find(|p| p.exists())
            .ok_or_else(|| NluError::CredentialNotFound(configured_path.to_string()))?;

        let raw_key = std::fs::read_to_string(key_path)?;
        let key: ServiceAccountKey = serde_json::from_str(&raw_key)?;
        let project_id = key.project_id.ok_or(NluError::MissingProjectId)?;
        let credentials = CustomServiceAccount::from_json(&raw_key)?;

        info!(
            "Dialogflow initialized from {} (project: {project_id})",
            key_path.display()
        );

        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            credentials,
            project_id,
        })
    }

    /// Sends one utterance to the agent under the given session and returns
    /// the detected intent.
    pub async fn detect_intent(&self, session_id: &str, text: &str) -> Result<IntentMatch, NluError> {
        let token = self.credentials.token(&[DIALOGFLOW_SCOPE]).await?;

        let url = format!(
            "https://dialogflow.googleapis.com/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.project_id, session_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&DetectIntentRequest {
                query_input: QueryInput {
                    text: TextInput {
                        text,
                        language_code: LANGUAGE_CODE,
                    },
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NluError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let detected: DetectIntentResponse = response.json().await?;
        let result = detected.query_result;

        Ok(IntentMatch {
            fulfillment_text: result.fulfillment_text,
            intent: result.intent.display_name,
            confidence: result.intent_detection_confidence,
        })
    }
}
