use thiserror::Error;

/// Errors from repository operations (trait definitions live in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from completion provider calls.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("completion request timed out")]
    Timeout,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty completion: no choices returned")]
    EmptyResponse,
}

/// Errors surfaced by the chat service.
///
/// The HTTP layer maps these onto status codes: the not-found variants
/// become 404, `Validation` becomes 400, and `Storage`/`Upstream`
/// become 500.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error("message not found")]
    MessageNotFound,

    #[error("no user message to regenerate")]
    NoPriorUserMessage,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("upstream error: {0}")]
    Upstream(#[from] CompletionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Provider {
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: rate limited");
        assert_eq!(
            CompletionError::Timeout.to_string(),
            "completion request timed out"
        );
    }

    #[test]
    fn test_chat_error_from_repository() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Storage(_)));
    }

    #[test]
    fn test_chat_error_from_completion() {
        let err: ChatError = CompletionError::Timeout.into();
        assert!(matches!(err, ChatError::Upstream(_)));
    }
}
