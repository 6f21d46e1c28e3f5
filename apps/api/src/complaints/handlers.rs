//! Axum route handlers for complaint intake and retrieval.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::complaints::pipeline::process_complaint;
use crate::errors::AppError;
use crate::models::complaint::ComplaintRecord;
use crate::state::AppState;

/// Hard cap on accepted complaint length, in characters.
const MAX_COMPLAINT_CHARS: usize = 5000;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub complaint: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub complaint_id: Option<u64>,
    pub status: Option<String>,
}

/// POST /process
///
/// Validates the submission, runs the enrichment pipeline, and returns the
/// stored record. The body is read raw so a wrong Content-Type maps to 415
/// and malformed JSON to 400, both with the service's JSON error shape.
pub async fn handle_process(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ComplaintRecord>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("application/json") {
        return Err(AppError::UnsupportedMediaType(
            "Content-Type must be application/json".to_string(),
        ));
    }

    let request: ProcessRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {e}")))?;

    let complaint = validate_complaint_text(&request.complaint)?;

    let record = process_complaint(
        state.store.as_ref(),
        state.llm.as_ref(),
        &state.config.institute_name,
        complaint,
    )
    .await?;

    Ok(Json(record))
}

/// Trims the submission and enforces the non-empty and length bounds.
fn validate_complaint_text(raw: &str) -> Result<&str, AppError> {
    let complaint = raw.trim();
    if complaint.is_empty() {
        return Err(AppError::Validation("complaint field is required".to_string()));
    }
    if complaint.chars().count() > MAX_COMPLAINT_CHARS {
        return Err(AppError::Validation("complaint text too long".to_string()));
    }
    Ok(complaint)
}

/// GET /complaints
///
/// Every stored record; an empty array when nothing has been filed yet.
pub async fn handle_list_complaints(
    State(state): State<AppState>,
) -> Result<Json<Vec<ComplaintRecord>>, AppError> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}

/// GET /complaints/:id
pub async fn handle_get_complaint(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ComplaintRecord>, AppError> {
    let record = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("not found".to_string()))?;
    Ok(Json(record))
}

/// POST /complaints/update
pub async fn handle_update_status(
    State(state): State<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(id), Some(status)) = (request.complaint_id, request.status.as_deref()) else {
        return Err(AppError::Validation(
            "complaint_id and status required".to_string(),
        ));
    };

    let updated = state.store.update_status(id, status).await?;
    if !updated {
        return Err(AppError::NotFound("Complaint not found".to_string()));
    }

    info!("Updated complaint {id} status to {status}");
    Ok(Json(json!({ "message": "Status updated successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_complaint_is_rejected() {
        assert!(validate_complaint_text("").is_err());
        assert!(validate_complaint_text("   \n\t ").is_err());
    }

    #[test]
    fn test_oversized_complaint_is_rejected() {
        let long = "x".repeat(MAX_COMPLAINT_CHARS + 1);
        assert!(validate_complaint_text(&long).is_err());
    }

    #[test]
    fn test_boundary_length_is_accepted() {
        let exact = "x".repeat(MAX_COMPLAINT_CHARS);
        assert_eq!(validate_complaint_text(&exact).unwrap().len(), MAX_COMPLAINT_CHARS);
    }

    #[test]
    fn test_validation_returns_trimmed_text() {
        assert_eq!(
            validate_complaint_text("  the wifi is down  ").unwrap(),
            "the wifi is down"
        );
    }

    #[test]
    fn test_length_is_counted_in_characters_not_bytes() {
        // Multi-byte characters: 5000 chars but 10000 bytes.
        let text = "é".repeat(MAX_COMPLAINT_CHARS);
        assert!(validate_complaint_text(&text).is_ok());
    }

    #[test]
    fn test_process_request_tolerates_missing_field() {
        let request: ProcessRequest = serde_json::from_str("{}").unwrap();
        assert!(request.complaint.is_empty());
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let request: UpdateStatusRequest =
            serde_json::from_str(r#"{"complaint_id": 12}"#).unwrap();
        assert_eq!(request.complaint_id, Some(12));
        assert!(request.status.is_none());
    }
}
