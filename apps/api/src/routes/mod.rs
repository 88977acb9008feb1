pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tasks::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Code generation, review and tests
        .route("/api/v1/generate-code", post(handlers::handle_generate_code))
        .route("/api/v1/review-code", post(handlers::handle_review_code))
        .route("/api/v1/generate-tests", post(handlers::handle_generate_tests))
        // Remaining task operations
        .route("/api/v1/analyze-error", post(handlers::handle_analyze_error))
        .route(
            "/api/v1/optimize-performance",
            post(handlers::handle_optimize_performance),
        )
        .route(
            "/api/v1/generate-docstring",
            post(handlers::handle_generate_docstring),
        )
        .route(
            "/api/v1/generate-readme",
            post(handlers::handle_generate_readme),
        )
        .with_state(state)
}
