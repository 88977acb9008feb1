//! Free-form code generation.

use crate::llm_client::CompletionProvider;
use crate::prompts::{TaskKind, TaskRequest};
use crate::tasks::{run_task, TaskError};

pub async fn generate_code(
    llm: &dyn CompletionProvider,
    prompt: &str,
    language: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new()
        .field("prompt", prompt)
        .field("language", language);
    run_task(llm, TaskKind::CodeGeneration, request).await
}
