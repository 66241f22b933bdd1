use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Grading and question generation
        .route("/grade", post(handlers::grade))
        .route("/questions", post(handlers::generate_questions))
        // Recording control
        .route("/sessions/record/start", post(handlers::start_session))
        .route("/sessions/record/stop", post(handlers::stop_session))
        .route("/sessions/segments", post(handlers::push_segment))
        // Session queries
        .route("/sessions/status", get(handlers::session_status))
        .route("/sessions/transcript", get(handlers::session_transcript))
        // Questioning phase
        .route(
            "/sessions/questioning/begin",
            post(handlers::begin_questioning),
        )
        .route(
            "/sessions/questioning/advance",
            post(handlers::advance_questioning),
        )
        // Report
        .route("/report", get(handlers::report))
        // The browser client calls from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
