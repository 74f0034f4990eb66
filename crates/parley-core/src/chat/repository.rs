//! ChatRepository trait definition.
//!
//! Provides CRUD operations for sessions, messages, and reactions.

use chrono::{DateTime, Utc};
use parley_types::error::RepositoryError;
use parley_types::message::{Message, Reaction};
use parley_types::session::Session;
use uuid::Uuid;

/// Repository trait for session, message, and reaction persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Getters return `Ok(None)` for missing rows; mutations against a
/// missing row return `RepositoryError::NotFound`.
pub trait ChatRepository: Send + Sync {
    /// Insert a new session row.
    fn create_session(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by ID, without its messages.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List all sessions ordered by updated_at DESC.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// List favorite sessions ordered by updated_at DESC.
    fn list_favorite_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Case-insensitive substring match on session titles, ordered by
    /// updated_at DESC.
    fn search_sessions(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Persist title, favorite flag, and updated_at changes.
    fn update_session(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session together with its messages and reactions in a
    /// single transaction.
    fn delete_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a message and bump the owning session's updated_at in a
    /// single transaction.
    fn insert_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a message by ID, with its reactions.
    fn get_message(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Messages for a session ordered by timestamp ASC, with reactions
    /// hydrated.
    fn list_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// The most recent user message in the session with a timestamp
    /// strictly before `before`.
    ///
    /// Timestamp ties resolve by insertion order, newest row first.
    fn latest_user_message_before(
        &self,
        session_id: &Uuid,
        before: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Flip is_regenerated to true on an existing message. The
    /// message's own original_message_id stays empty; only replacement
    /// messages carry one.
    fn mark_regenerated(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a reaction for a message.
    fn insert_reaction(
        &self,
        reaction: &Reaction,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Reactions for a message, in insertion order.
    fn list_reactions(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Reaction>, RepositoryError>> + Send;
}
