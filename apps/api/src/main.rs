mod complaints;
mod config;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod nlu;
mod routes;
mod state;
mod store;
mod taxonomy;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::nlu::NluClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Complaints API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the complaint store
    let store = Arc::new(JsonFileStore::new(&config.storage_file));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.groq_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize Dialogflow; a missing credential disables the chatbot
    // endpoint without taking the rest of the service down.
    let nlu = match NluClient::initialize(&config.service_account_file) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            error!("Failed to initialize Dialogflow: {e}");
            None
        }
    };

    // Build app state
    let state = AppState {
        store,
        llm,
        nlu,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
