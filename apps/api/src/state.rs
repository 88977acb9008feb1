use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::config::Config;
use crate::deadline::with_optional_deadline;
use crate::llm_client::{CompletionProvider, LlmClient, LlmError};

/// What the completion client is built from on first use.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub completion_timeout: Option<Duration>,
}

impl From<&Config> for ProviderSettings {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            api_base: config.openai_api_base.clone(),
            completion_timeout: config.completion_timeout,
        }
    }
}

impl ProviderSettings {
    fn connect(&self) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        let client = LlmClient::configure(self.api_key.clone())?.with_api_base(&self.api_base);
        tracing::info!(
            "LLM client initialized (model: {}, base: {})",
            crate::llm_client::MODEL,
            client.api_base()
        );
        Ok(with_optional_deadline(
            Arc::new(client),
            self.completion_timeout,
        ))
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The provider is built by the first request that needs it. A missing
/// credential fails that request only; `/health` and later retries are unaffected.
#[derive(Clone)]
pub struct AppState {
    llm: Arc<OnceCell<Arc<dyn CompletionProvider>>>,
    settings: Arc<ProviderSettings>,
}

impl AppState {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            llm: Arc::new(OnceCell::new()),
            settings: Arc::new(settings),
        }
    }

    /// State with an already-built provider; settings are never consulted.
    #[cfg(test)]
    pub fn with_provider(llm: Arc<dyn CompletionProvider>) -> Self {
        Self {
            llm: Arc::new(OnceCell::new_with(Some(llm))),
            settings: Arc::new(ProviderSettings {
                api_key: None,
                api_base: crate::config::DEFAULT_OPENAI_API_BASE.to_string(),
                completion_timeout: None,
            }),
        }
    }

    /// The completion provider, configured on first call.
    pub async fn llm(&self) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        self.llm
            .get_or_try_init(|| async { self.settings.connect() })
            .await
            .cloned()
    }
}
