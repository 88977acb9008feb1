// Task modules: one file per assistant capability.
// Each operation builds a TaskRequest, renders its prompt and makes exactly one
// completion call. The model's text is returned as-is.

pub mod bug_detector;
pub mod code_assistant;
pub mod code_reviewer;
pub mod doc_generator;
pub mod handlers;
pub mod test_generator;

use thiserror::Error;
use tracing::debug;

use crate::llm_client::{CompletionProvider, LlmError};
use crate::prompts::{build, PromptError, TaskKind, TaskRequest};

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_FRAMEWORK: &str = "pytest";

/// Why a task operation produced no text.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Completion(#[from] LlmError),
}

/// Shared pipeline: prompt → completion → raw text.
async fn run_task(
    llm: &dyn CompletionProvider,
    kind: TaskKind,
    request: TaskRequest,
) -> Result<String, TaskError> {
    let spec = build(kind, &request)?;
    let completion = llm.complete(&spec).await?;

    if let Some(usage) = &completion.raw_token_usage {
        debug!(
            "{kind} completion: prompt_tokens={}, completion_tokens={}, total_tokens={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(completion.text)
}
