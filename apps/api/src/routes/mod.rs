pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/rubric", get(handlers::handle_get_rubric))
        // Evaluation API
        .route(
            "/api/v1/evaluations",
            get(handlers::handle_list_evaluations)
                .post(handlers::handle_upload)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/evaluations/text",
            post(handlers::handle_evaluate_text),
        )
        .route(
            "/api/v1/evaluations/parse",
            post(handlers::handle_parse_response),
        )
        .with_state(state)
}
