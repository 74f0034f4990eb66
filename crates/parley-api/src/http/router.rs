//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/`. Middleware: CORS, request tracing.

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session CRUD
        .route(
            "/sessions",
            get(handlers::session::list_sessions).post(handlers::session::create_session),
        )
        .route(
            "/sessions/favorites",
            get(handlers::session::list_favorite_sessions),
        )
        .route(
            "/sessions/search",
            get(handlers::session::search_sessions),
        )
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route("/sessions/{id}", put(handlers::session::update_session))
        .route("/sessions/{id}", delete(handlers::session::delete_session))
        .route(
            "/sessions/{id}/favorite",
            post(handlers::session::toggle_favorite),
        )
        // Chat
        .route("/chat/send", post(handlers::chat::send_message))
        .route("/chat/regenerate", post(handlers::chat::regenerate_message))
        .route("/chat/messages/{id}", get(handlers::chat::get_messages));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .route("/ws/chat/{session_id}", get(ws_placeholder))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "parley",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.to_string(),
    }))
}

/// GET /ws/chat/{sessionId} - Placeholder until real-time delivery lands.
async fn ws_placeholder(Path(session_id): Path<String>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "WebSocket endpoint - not implemented yet",
        "sessionId": session_id,
    }))
}
