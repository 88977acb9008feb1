//! Caller-side deadline around a completion provider.
//!
//! The client itself never times out. When `COMPLETION_TIMEOUT_SECS` is set the
//! server wraps its provider in `DeadlineProvider`; an expired deadline surfaces
//! as `LlmError::Timeout`, which the router treats like any provider failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{CompletionProvider, CompletionResult, LlmError};
use crate::prompts::PromptSpec;

pub struct DeadlineProvider {
    inner: Arc<dyn CompletionProvider>,
    limit: Duration,
}

impl DeadlineProvider {
    pub fn new(inner: Arc<dyn CompletionProvider>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl CompletionProvider for DeadlineProvider {
    async fn complete(&self, spec: &PromptSpec) -> Result<CompletionResult, LlmError> {
        tokio::time::timeout(self.limit, self.inner.complete(spec))
            .await
            .map_err(|_| LlmError::Timeout(self.limit))?
    }
}

/// Applies `limit` to `provider` when one is configured.
pub fn with_optional_deadline(
    provider: Arc<dyn CompletionProvider>,
    limit: Option<Duration>,
) -> Arc<dyn CompletionProvider> {
    match limit {
        Some(limit) => Arc::new(DeadlineProvider::new(provider, limit)),
        None => provider,
    }
}
