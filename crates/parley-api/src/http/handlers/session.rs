//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/sessions               - List sessions
//! - POST   /api/sessions               - Create a session
//! - GET    /api/sessions/favorites     - List favorite sessions
//! - GET    /api/sessions/search        - Search sessions by title
//! - GET    /api/sessions/{id}          - Get a session with its messages
//! - PUT    /api/sessions/{id}          - Update title / favorite flag
//! - DELETE /api/sessions/{id}          - Delete a session and its messages
//! - POST   /api/sessions/{id}/favorite - Toggle the favorite flag

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use parley_types::session::Session;

use crate::http::error::AppError;
use crate::http::extract::AppJson;
use crate::http::handlers::parse_session_id;
use crate::state::AppState;

/// Request body for session creation.
#[derive(Debug, Deserialize, Default)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for partial session updates.
///
/// `title` omitted or blank keeps the current title; `is_favorite` is
/// tri-state (absent leaves the flag unchanged).
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

/// Query parameters for title search.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub session: Session,
    pub message: &'static str,
}

/// GET /api/sessions - List all sessions, most recently active first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<AppJson<SessionsResponse>, AppError> {
    let sessions = state.chat_service.list_sessions().await?;
    Ok(AppJson(SessionsResponse { sessions }))
}

/// POST /api/sessions - Create a session; 201 on success.
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateSessionRequest>,
) -> Result<(StatusCode, AppJson<SessionResponse>), AppError> {
    let session = state.chat_service.create_session(req.title).await?;
    Ok((StatusCode::CREATED, AppJson(SessionResponse { session })))
}

/// GET /api/sessions/favorites - List favorite sessions.
pub async fn list_favorite_sessions(
    State(state): State<AppState>,
) -> Result<AppJson<SessionsResponse>, AppError> {
    let sessions = state.chat_service.list_favorite_sessions().await?;
    Ok(AppJson(SessionsResponse { sessions }))
}

/// GET /api/sessions/search?q= - Case-insensitive title search.
pub async fn search_sessions(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<AppJson<SessionsResponse>, AppError> {
    let sessions = state.chat_service.search_sessions(&query.q).await?;
    Ok(AppJson(SessionsResponse { sessions }))
}

/// GET /api/sessions/{id} - Get a session with its messages.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<AppJson<SessionResponse>, AppError> {
    let sid = parse_session_id(&session_id)?;
    let session = state.chat_service.get_session(&sid).await?;
    Ok(AppJson(SessionResponse { session }))
}

/// PUT /api/sessions/{id} - Apply a partial update.
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<UpdateSessionRequest>,
) -> Result<AppJson<SessionResponse>, AppError> {
    let sid = parse_session_id(&session_id)?;
    let session = state
        .chat_service
        .update_session(&sid, req.title, req.is_favorite)
        .await?;
    Ok(AppJson(SessionResponse { session }))
}

/// DELETE /api/sessions/{id} - Delete a session and everything it owns.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<AppJson<DeletedResponse>, AppError> {
    let sid = parse_session_id(&session_id)?;
    state.chat_service.delete_session(&sid).await?;
    Ok(AppJson(DeletedResponse {
        message: "Session deleted successfully",
    }))
}

/// POST /api/sessions/{id}/favorite - Toggle the favorite flag.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<AppJson<FavoriteResponse>, AppError> {
    let sid = parse_session_id(&session_id)?;
    let session = state.chat_service.toggle_favorite(&sid).await?;
    Ok(AppJson(FavoriteResponse {
        session,
        message: "Favorite status updated",
    }))
}
