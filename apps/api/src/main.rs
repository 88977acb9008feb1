mod config;
mod deadline;
mod errors;
mod llm_client;
mod prompts;
mod routes;
mod state;
mod tasks;

use std::net::SocketAddr;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::{AppState, ProviderSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting devassist API v{}", env!("CARGO_PKG_VERSION"));

    // The completion client is built by the first request that needs it.
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; task endpoints will answer MISSING_CREDENTIAL");
    }
    if let Some(limit) = config.completion_timeout {
        info!("Completion deadline: {}s", limit.as_secs());
    }

    let app = build_router(AppState::new(ProviderSettings::from(&config))).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
