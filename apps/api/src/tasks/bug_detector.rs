//! Bug analysis and performance suggestions.

use crate::llm_client::CompletionProvider;
use crate::prompts::{TaskKind, TaskRequest};
use crate::tasks::{run_task, TaskError};

/// Explains an error against the code that raised it and proposes a fix.
pub async fn analyze_error(
    llm: &dyn CompletionProvider,
    error_message: &str,
    code_snippet: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new()
        .field("error_message", error_message)
        .field("code_snippet", code_snippet);
    run_task(llm, TaskKind::BugAnalysis, request).await
}

/// Suggests complexity and memory improvements for `code`.
pub async fn optimize_performance(
    llm: &dyn CompletionProvider,
    code: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new().field("code", code);
    run_task(llm, TaskKind::PerformanceOptimization, request).await
}
