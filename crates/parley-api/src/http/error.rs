//! Application error type mapping to HTTP status codes and the JSON
//! error body `{error, message, code}`.
//!
//! Storage and upstream failures are logged with their detail but
//! surfaced to the client with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use parley_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat service errors.
    Chat(ChatError),
    /// Malformed or missing request fields.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

/// JSON body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub code: u16,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Chat(ChatError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "Session not found",
                "The specified session does not exist".to_string(),
            ),
            AppError::Chat(ChatError::MessageNotFound) => (
                StatusCode::NOT_FOUND,
                "Message not found",
                "The specified message does not exist".to_string(),
            ),
            AppError::Chat(ChatError::NoPriorUserMessage) => (
                StatusCode::NOT_FOUND,
                "User message not found",
                "Could not find the user message to regenerate".to_string(),
            ),
            AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid request", msg.clone())
            }
            AppError::Chat(ChatError::Storage(err)) => {
                tracing::error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Chat(ChatError::Upstream(err)) => {
                tracing::error!(error = %err, "completion failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI service error",
                    "Failed to get a completion response".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid request", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        let body = ErrorBody {
            error: error.to_string(),
            message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::error::{CompletionError, RepositoryError};

    #[test]
    fn test_not_found_mappings() {
        for err in [
            ChatError::SessionNotFound,
            ChatError::MessageNotFound,
            ChatError::NoPriorUserMessage,
        ] {
            let (status, _, _) = AppError::Chat(err).parts();
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, error, message) =
            AppError::Validation("message must not be empty".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "Invalid request");
        assert_eq!(message, "message must not be empty");
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let storage = AppError::Chat(ChatError::Storage(RepositoryError::Query(
            "secret table layout".to_string(),
        )));
        let (status, _, message) = storage.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("secret table layout"));

        let upstream = AppError::Chat(ChatError::Upstream(CompletionError::Provider {
            message: "provider internals".to_string(),
        }));
        let (status, _, message) = upstream.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("provider internals"));
    }

    #[test]
    fn test_error_body_mirrors_status() {
        let (status, error, message) = AppError::Chat(ChatError::SessionNotFound).parts();
        let body = ErrorBody {
            error: error.to_string(),
            message,
            code: status.as_u16(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"code\":404"));
        assert!(json.contains("\"error\":\"Session not found\""));
    }
}
