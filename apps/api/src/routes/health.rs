use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service banner for anyone poking the root path.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "Campus Complaint System API",
        "status": "running"
    }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
