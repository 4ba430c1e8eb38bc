use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Conversational engine
        .route("/chat", post(handlers::chat))
        .route("/sessions/:id", get(handlers::get_session))
        .route("/chat/fallback", post(handlers::fallback_chat))
        // Catalogs
        .route("/plans", get(handlers::get_plans))
        .route("/movies", get(handlers::get_movies))
        // Direct engine calls
        .route("/advice", post(handlers::advice))
        .route("/availability", post(handlers::availability))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
