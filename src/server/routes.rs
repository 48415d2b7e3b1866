use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/analyze/batch", get(handlers::analyze_batch))
        .route("/history", get(handlers::history))
        .with_state(app_state);

    Router::new().nest("/api", api)
}
