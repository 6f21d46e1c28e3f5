pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::complaints::handlers as complaints;
use crate::nlu::handlers as nlu;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route("/process", post(complaints::handle_process))
        .route("/complaints", get(complaints::handle_list_complaints))
        .route("/complaints/update", post(complaints::handle_update_status))
        .route("/complaints/:id", get(complaints::handle_get_complaint))
        .route("/dialogflow/message", post(nlu::handle_message))
        .with_state(state)
}
