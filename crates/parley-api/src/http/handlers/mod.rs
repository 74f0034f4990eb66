//! HTTP request handlers for the REST API.

pub mod chat;
pub mod session;

use uuid::Uuid;

use parley_types::error::ChatError;

use crate::http::error::AppError;

/// Parse a session ID. An unparsable ID cannot reference an existing
/// row, so it surfaces as the same 404 the lookup would produce.
pub(crate) fn parse_session_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::SessionNotFound))
}

/// Parse a message ID; see [`parse_session_id`] for the 404 rationale.
pub(crate) fn parse_message_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::MessageNotFound))
}
