pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessment/evaluate",
            post(handlers::handle_evaluate),
        )
        .route("/api/v1/assessment/score", post(handlers::handle_score))
        .route(
            "/api/v1/assessment/questions",
            post(handlers::handle_generate_questions),
        )
        // Major catalog API
        .route(
            "/api/v1/majors",
            get(handlers::handle_list_majors).post(handlers::handle_upsert_major),
        )
        .route("/api/v1/majors/:id", get(handlers::handle_get_major))
        .route("/api/v1/categories", get(handlers::handle_list_categories))
        .with_state(state)
}
