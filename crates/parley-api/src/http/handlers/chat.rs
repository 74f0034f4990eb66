//! Chat exchange HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/send          - Send a user message, reply with the bot turn
//! - POST /api/chat/regenerate    - Produce a replacement bot reply
//! - GET  /api/chat/messages/{id} - Messages for a session, oldest first

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_types::message::Message;

use crate::http::error::AppError;
use crate::http::extract::AppJson;
use crate::http::handlers::{parse_message_id, parse_session_id};
use crate::state::AppState;

/// Request body for sending a message. An absent or empty `sessionId`
/// starts a new conversation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response carrying the bot reply and the session it landed in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: Message,
    pub session_id: Uuid,
}

/// Request body for regenerating a bot message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateMessageRequest {
    pub message_id: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// POST /api/chat/send - Persist the user message, reply with the bot turn.
pub async fn send_message(
    State(state): State<AppState>,
    AppJson(req): AppJson<SendMessageRequest>,
) -> Result<AppJson<SendMessageResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "message must not be empty".to_string(),
        ));
    }

    let session_id = req
        .session_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_session_id)
        .transpose()?;

    let reply = state
        .chat_service
        .send_message(session_id, req.message)
        .await?;

    Ok(AppJson(SendMessageResponse {
        message: reply.message,
        session_id: reply.session_id,
    }))
}

/// POST /api/chat/regenerate - Produce a replacement bot reply for the
/// user turn preceding the target message.
pub async fn regenerate_message(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegenerateMessageRequest>,
) -> Result<AppJson<MessageResponse>, AppError> {
    let message_id = parse_message_id(&req.message_id)?;
    let session_id = parse_session_id(&req.session_id)?;

    let message = state
        .chat_service
        .regenerate_message(&message_id, &session_id)
        .await?;

    Ok(AppJson(MessageResponse { message }))
}

/// GET /api/chat/messages/{id} - Messages for a session, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<AppJson<MessagesResponse>, AppError> {
    let sid = parse_session_id(&session_id)?;
    let messages = state.chat_service.list_messages(&sid).await?;
    Ok(AppJson(MessagesResponse { messages }))
}
