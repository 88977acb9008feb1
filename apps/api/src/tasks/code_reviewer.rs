//! Code review.

use crate::llm_client::CompletionProvider;
use crate::prompts::{TaskKind, TaskRequest};
use crate::tasks::{run_task, TaskError};

/// Reviews `code` for security, performance, readability, architecture,
/// testing and standards.
pub async fn review_code(
    llm: &dyn CompletionProvider,
    code: &str,
    language: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new()
        .field("code", code)
        .field("language", language);
    run_task(llm, TaskKind::CodeReview, request).await
}
