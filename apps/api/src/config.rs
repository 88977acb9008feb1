use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
///
/// The provider credential is optional here: its absence is reported by
/// `LlmClient::configure`, not by config loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub completion_timeout: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_api_base: optional_env("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            completion_timeout: optional_env("COMPLETION_TIMEOUT_SECS")
                .map(|raw| parse_timeout_secs(&raw))
                .transpose()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("COMPLETION_TIMEOUT_SECS must be a whole number, got '{raw}'"))?;
    anyhow::ensure!(secs > 0, "COMPLETION_TIMEOUT_SECS must be greater than zero");
    Ok(Duration::from_secs(secs))
}
