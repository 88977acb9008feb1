//! Docstring and README generation.

use crate::llm_client::CompletionProvider;
use crate::prompts::{TaskKind, TaskRequest};
use crate::tasks::{run_task, TaskError};

/// Google-style docstring for a single function.
pub async fn generate_docstring(
    llm: &dyn CompletionProvider,
    function_code: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new().field("function_code", function_code);
    run_task(llm, TaskKind::DocstringGeneration, request).await
}

/// Markdown README from a free-text project description.
pub async fn generate_readme(
    llm: &dyn CompletionProvider,
    project_info: &str,
) -> Result<String, TaskError> {
    let request = TaskRequest::new().field("project_info", project_info);
    run_task(llm, TaskKind::ReadmeGeneration, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubProvider;

    const FUNC: &str = "def suma(a: int, b: int) -> int:\n    return a + b";

    #[tokio::test]
    async fn test_generate_docstring() {
        let llm = StubProvider::replying("\"\"\"Suma dos enteros.\"\"\"");

        let doc = generate_docstring(&llm, FUNC).await.unwrap();

        assert_eq!(doc, "\"\"\"Suma dos enteros.\"\"\"");
        let spec = llm.last_spec().unwrap();
        assert!(spec.user_content.contains(FUNC));
        assert_eq!(spec.max_output_tokens, 800);
        assert!((spec.sampling_temperature - 0.3).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_generate_readme_runs_warmer() {
        let llm = StubProvider::replying("# Demo");
        let info = "Proyecto para demostrar generación automática de documentación";

        generate_readme(&llm, info).await.unwrap();

        let spec = llm.last_spec().unwrap();
        assert!(spec.user_content.contains(info));
        assert_eq!(spec.max_output_tokens, 1200);
        assert!((spec.sampling_temperature - 0.4).abs() < f64::EPSILON);
    }
}
