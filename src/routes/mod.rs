//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - JSON API under `/api/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/health", get(http::http_health))
        .route("/api/user", get(http::http_get_user))
        .route("/api/questions", get(http::http_list_questions))
        .route("/api/questions/random", get(http::http_random_questions))
        .route("/api/questions/:id", get(http::http_get_question))
        .route("/api/sessions", post(http::http_create_session))
        .route(
            "/api/sessions/:id",
            get(http::http_get_session).patch(http::http_patch_session),
        )
        .route("/api/sessions/:id/responses", get(http::http_session_responses))
        .route(
            "/api/users/:id/sessions/active",
            get(http::http_user_active_sessions),
        )
        .route("/api/responses", post(http::http_create_response))
        .route("/api/responses/:id", patch(http::http_patch_response))
        .route(
            "/api/users/:id/progress",
            get(http::http_user_progress).patch(http::http_patch_progress),
        )
        .route("/api/users/:id/stats", get(http::http_user_stats))
        .route("/api/interviews", post(http::http_create_interview))
        .route("/api/interviews/:id", get(http::http_get_interview))
        .route(
            "/api/interviews/:id/messages",
            post(http::http_interview_message),
        )
        .route("/api/interviews/:id/end", post(http::http_end_interview))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
