use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::prompts::PromptError;
use crate::tasks::TaskError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every failure below the router ends up here and leaves as the same JSON shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid task kind: {0}")]
    InvalidTaskKind(String),

    #[error("Completion client unavailable: {0}")]
    MissingCredential(LlmError),

    #[error("Provider error: {0}")]
    Provider(LlmError),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            missing @ LlmError::MissingCredential => AppError::MissingCredential(missing),
            other => AppError::Provider(other),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Prompt(e) => e.into(),
            TaskError::Completion(e) => e.into(),
        }
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::InvalidTaskKind(kind) => AppError::InvalidTaskKind(kind),
            missing @ PromptError::MissingField { .. } => {
                AppError::InvalidRequest(missing.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidRequest(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            AppError::InvalidTaskKind(kind) => {
                tracing::error!("Unknown task kind reached the router: {kind}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_TASK_KIND",
                    format!("Unknown task kind '{kind}'"),
                )
            }
            AppError::MissingCredential(e) => {
                tracing::error!("Completion client unavailable: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MISSING_CREDENTIAL",
                    e.to_string(),
                )
            }
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string())
            }
        };

        let body = Json(json!({
            "status": "error",
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
