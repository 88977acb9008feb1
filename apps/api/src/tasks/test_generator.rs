//! Unit test generation.

use crate::llm_client::CompletionProvider;
use crate::prompts::{TaskKind, TaskRequest};
use crate::tasks::{run_task, TaskError};

pub async fn generate_tests(
    llm: &dyn CompletionProvider,
    code: &str,
    framework: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new()
        .field("code", code)
        .field("framework", framework);
    run_task(llm, TaskKind::TestGeneration, request).await
}
