//! In-memory `CompletionProvider` for handler and task tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionProvider, CompletionResult, LlmError};
use crate::prompts::PromptSpec;

pub struct StubProvider {
    reply: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_spec: Mutex<Option<PromptSpec>>,
}

impl StubProvider {
    /// Answers every prompt with `text`.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_spec: Mutex::new(None),
        }
    }

    /// Fails every prompt with a 503 from the "provider".
    pub fn failing() -> Self {
        Self {
            reply: None,
            ..Self::replying("")
        }
    }

    /// Sleeps before answering; used to exercise deadlines.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_spec(&self) -> Option<PromptSpec> {
        self.last_spec.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, spec: &PromptSpec) -> Result<CompletionResult, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_spec.lock().unwrap() = Some(spec.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Some(text) => Ok(CompletionResult {
                text: text.clone(),
                raw_token_usage: None,
            }),
            None => Err(LlmError::Api {
                status: 503,
                message: "stub provider unavailable".to_string(),
            }),
        }
    }
}
