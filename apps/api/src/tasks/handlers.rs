//! Axum route handlers for the assistant API.
//!
//! Each handler validates its body, calls exactly one task operation and wraps
//! the text in that endpoint's response type.

use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tasks::{
    bug_detector, code_assistant, code_reviewer, doc_generator, test_generator, DEFAULT_FRAMEWORK,
    DEFAULT_LANGUAGE,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_framework() -> String {
    DEFAULT_FRAMEWORK.to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateCodeRequest {
    pub prompt: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Echoed back as `provider_used`; every request goes to the same provider.
    #[serde(default = "default_provider")]
    pub provider: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateCodeResponse {
    pub generated_code: String,
    pub provider_used: String,
    /// Whitespace-separated word count of `generated_code`, not provider tokens.
    pub tokens_used: usize,
    /// Wall-clock seconds spent in the task call.
    pub execution_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewCodeRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Completed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewCodeResponse {
    pub review: String,
    pub status: ReviewStatus,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTestsRequest {
    pub code: String,
    #[serde(default = "default_framework")]
    pub framework: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTestsResponse {
    pub tests: String,
    pub framework: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeErrorRequest {
    pub error_message: String,
    pub code_snippet: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeErrorResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct OptimizePerformanceRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizePerformanceResponse {
    pub optimization: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDocstringRequest {
    pub function_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateDocstringResponse {
    pub docstring: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateReadmeRequest {
    pub project_info: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateReadmeResponse {
    pub readme: String,
}

/// Naive token estimate: number of whitespace-delimited words.
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate-code
pub async fn handle_generate_code(
    State(state): State<AppState>,
    payload: Result<Json<GenerateCodeRequest>, JsonRejection>,
) -> Result<Json<GenerateCodeResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let started = Instant::now();
    let generated_code =
        code_assistant::generate_code(llm.as_ref(), &request.prompt, &request.language)
            .await?;
    let execution_time = started.elapsed().as_secs_f64();

    info!(
        "Generated {} code in {:.2}s",
        request.language, execution_time
    );

    Ok(Json(GenerateCodeResponse {
        tokens_used: estimate_tokens(&generated_code),
        generated_code,
        provider_used: request.provider,
        execution_time,
    }))
}

/// POST /api/v1/review-code
pub async fn handle_review_code(
    State(state): State<AppState>,
    payload: Result<Json<ReviewCodeRequest>, JsonRejection>,
) -> Result<Json<ReviewCodeResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let review =
        code_reviewer::review_code(llm.as_ref(), &request.code, &request.language).await?;

    Ok(Json(ReviewCodeResponse {
        review,
        status: ReviewStatus::Completed,
    }))
}

/// POST /api/v1/generate-tests
pub async fn handle_generate_tests(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTestsRequest>, JsonRejection>,
) -> Result<Json<GenerateTestsResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let tests =
        test_generator::generate_tests(llm.as_ref(), &request.code, &request.framework)
            .await?;

    Ok(Json(GenerateTestsResponse {
        tests,
        framework: request.framework,
    }))
}

/// POST /api/v1/analyze-error
pub async fn handle_analyze_error(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeErrorRequest>, JsonRejection>,
) -> Result<Json<AnalyzeErrorResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let analysis = bug_detector::analyze_error(
        llm.as_ref(),
        &request.error_message,
        &request.code_snippet,
    )
    .await?;

    Ok(Json(AnalyzeErrorResponse { analysis }))
}

/// POST /api/v1/optimize-performance
pub async fn handle_optimize_performance(
    State(state): State<AppState>,
    payload: Result<Json<OptimizePerformanceRequest>, JsonRejection>,
) -> Result<Json<OptimizePerformanceResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let optimization = bug_detector::optimize_performance(llm.as_ref(), &request.code).await?;

    Ok(Json(OptimizePerformanceResponse { optimization }))
}

/// POST /api/v1/generate-docstring
pub async fn handle_generate_docstring(
    State(state): State<AppState>,
    payload: Result<Json<GenerateDocstringRequest>, JsonRejection>,
) -> Result<Json<GenerateDocstringResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let docstring =
        doc_generator::generate_docstring(llm.as_ref(), &request.function_code).await?;

    Ok(Json(GenerateDocstringResponse { docstring }))
}

/// POST /api/v1/generate-readme
pub async fn handle_generate_readme(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReadmeRequest>, JsonRejection>,
) -> Result<Json<GenerateReadmeResponse>, AppError> {
    let Json(request) = payload?;
    let llm = state.llm().await?;

    let readme = doc_generator::generate_readme(llm.as_ref(), &request.project_info).await?;

    Ok(Json(GenerateReadmeResponse { readme }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::deadline::DeadlineProvider;
    use crate::llm_client::stub::StubProvider;
    use crate::routes::build_router;
    use crate::state::ProviderSettings;

    fn app_with(llm: Arc<StubProvider>) -> Router {
        build_router(AppState::with_provider(llm))
    }

    async fn post(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post(app, uri, body.to_string()).await
    }

    fn assert_uniform_error(body: &Value, code: &str) {
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], code);
        assert!(body["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[test]
    fn test_estimate_tokens_counts_whitespace_words() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("def add(a, b):\n    return a + b"), 7);
        assert_eq!(estimate_tokens("  padded\t\ttext \n"), 2);
    }

    #[tokio::test]
    async fn test_generate_code_reports_word_count_and_timing() {
        let reply = "def add(a, b):\n    return a + b";
        let llm = Arc::new(StubProvider::replying(reply));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/generate-code",
            json!({"prompt": "add two numbers"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: GenerateCodeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.generated_code, reply);
        assert!(!response.generated_code.is_empty());
        assert_eq!(
            response.tokens_used,
            response.generated_code.split_whitespace().count()
        );
        assert!(response.execution_time >= 0.0);
        assert_eq!(response.provider_used, "openai");
        assert!(llm.last_spec().unwrap().user_content.contains("python"));
    }

    #[tokio::test]
    async fn test_generate_code_echoes_provider_without_routing_on_it() {
        let llm = Arc::new(StubProvider::replying("fn main() {}"));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/generate-code",
            json!({"prompt": "hello world", "language": "rust", "provider": "anthropic"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider_used"], "anthropic");
        assert_eq!(llm.calls(), 1);
        assert!(llm.last_spec().unwrap().user_content.contains("rust"));
    }

    #[tokio::test]
    async fn test_review_code_completes() {
        let llm = Arc::new(StubProvider::replying("Consider adding type hints."));

        let (status, body) = post_json(
            app_with(llm),
            "/api/v1/review-code",
            json!({"code": "def suma(a,b): return a+b"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: ReviewCodeResponse = serde_json::from_value(body.clone()).unwrap();
        assert!(!response.review.is_empty());
        assert_eq!(response.status, ReviewStatus::Completed);
        assert_eq!(body["status"], "completed");
    }

    #[tokio::test]
    async fn test_generate_tests_defaults_to_pytest() {
        let llm = Arc::new(StubProvider::replying("def test_inc(): assert inc(1) == 2"));

        let (status, body) = post_json(
            app_with(llm),
            "/api/v1/generate-tests",
            json!({"code": "def inc(x): return x + 1"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["framework"], "pytest");
        assert_eq!(body["tests"], "def test_inc(): assert inc(1) == 2");
    }

    #[tokio::test]
    async fn test_generate_tests_without_code_never_calls_provider() {
        let llm = Arc::new(StubProvider::replying("unused"));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/generate-tests",
            json!({"framework": "unittest"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_uniform_error(&body, "INVALID_REQUEST");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_invalid_request() {
        let llm = Arc::new(StubProvider::replying("unused"));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/review-code",
            json!({"code": 42}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_uniform_error(&body, "INVALID_REQUEST");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_request() {
        let llm = Arc::new(StubProvider::replying("unused"));

        let (status, body) = post(app_with(llm.clone()), "/api/v1/generate-code", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_uniform_error(&body, "INVALID_REQUEST");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_fields_are_forwarded() {
        let llm = Arc::new(StubProvider::replying("Nothing to review."));

        let (status, _) = post_json(
            app_with(llm.clone()),
            "/api/v1/review-code",
            json!({"code": "", "language": ""}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_uniform_error() {
        let llm = Arc::new(StubProvider::failing());

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/review-code",
            json!({"code": "x = 1"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_uniform_error(&body, "PROVIDER_ERROR");
        assert!(body.get("review").is_none());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_is_a_provider_error() {
        let slow = Arc::new(StubProvider::replying("late").delayed(Duration::from_secs(60)));
        let state = AppState::with_provider(Arc::new(DeadlineProvider::new(
            slow,
            Duration::from_secs(2),
        )));

        let (status, body) = post_json(
            build_router(state),
            "/api/v1/generate-code",
            json!({"prompt": "anything"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_uniform_error(&body, "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_error_endpoint() {
        let llm = Arc::new(StubProvider::replying("Define x before printing it."));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/analyze-error",
            json!({"error_message": "NameError: name 'x' is not defined", "code_snippet": "print(x)"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"], "Define x before printing it.");
        assert_eq!(llm.last_spec().unwrap().max_output_tokens, 1200);
    }

    #[tokio::test]
    async fn test_analyze_error_requires_both_fields() {
        let llm = Arc::new(StubProvider::replying("unused"));

        let (status, _) = post_json(
            app_with(llm.clone()),
            "/api/v1/analyze-error",
            json!({"error_message": "boom"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_optimize_performance_endpoint() {
        let llm = Arc::new(StubProvider::replying("Use sorted()."));

        let (status, body) = post_json(
            app_with(llm),
            "/api/v1/optimize-performance",
            json!({"code": "for i in range(n): pass"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["optimization"], "Use sorted().");
    }

    #[tokio::test]
    async fn test_documentation_endpoints() {
        let llm = Arc::new(StubProvider::replying("docs"));

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/generate-docstring",
            json!({"function_code": "def f(): pass"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["docstring"], "docs");

        let (status, body) = post_json(
            app_with(llm.clone()),
            "/api/v1/generate-readme",
            json!({"project_info": "A tiny demo"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["readme"], "docs");
        assert_eq!(llm.calls(), 2);
    }

    fn keyless_app() -> Router {
        build_router(AppState::new(ProviderSettings {
            api_key: None,
            api_base: "http://127.0.0.1:9/v1".to_string(),
            completion_timeout: None,
        }))
    }

    #[tokio::test]
    async fn test_keyless_server_still_answers_health() {
        let response = keyless_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_keyless_server_reports_missing_credential_per_request() {
        let app = keyless_app();

        let (status, body) = post_json(
            app.clone(),
            "/api/v1/review-code",
            json!({"code": "def suma(a,b): return a+b"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_uniform_error(&body, "MISSING_CREDENTIAL");

        // Nothing is cached on failure; the next request fails the same way.
        let (status, body) = post_json(
            app,
            "/api/v1/generate-code",
            json!({"prompt": "add two numbers"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_uniform_error(&body, "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_keyless_server_still_validates_bodies_first() {
        let (status, body) = post_json(
            keyless_app(),
            "/api/v1/generate-tests",
            json!({"framework": "pytest"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_uniform_error(&body, "INVALID_REQUEST");
    }
}
