use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub storage_file: String,
    pub service_account_file: String,
    pub institute_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            storage_file: std::env::var("STORAGE_FILE")
                .unwrap_or_else(|_| "complaints_store.json".to_string()),
            service_account_file: std::env::var("SERVICE_ACCOUNT_FILE")
                .unwrap_or_else(|_| "service_account.json".to_string()),
            institute_name: std::env::var("INSTITUTE_NAME")
                .unwrap_or_else(|_| "IIIT Nagpur".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
