use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/options", get(handlers::get_options))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
