//! Chat service orchestrating session lifecycle, message persistence,
//! and completion calls.
//!
//! ChatService coordinates between the ChatRepository and the
//! CompletionClient: creating sessions, appending messages, the
//! send/reply exchange, and the regenerate sequence.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use parley_types::error::{ChatError, RepositoryError};
use parley_types::message::{Message, MessageType, Sender};
use parley_types::session::Session;

use crate::chat::repository::ChatRepository;
use crate::completion::{CompletionClient, CompletionVariant};

/// A bot reply produced by [`ChatService::send_message`], together with
/// the session it landed in (which may have been created by the call).
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub message: Message,
    pub session_id: Uuid,
}

/// Orchestrates chat session lifecycle, message persistence, and
/// completion calls.
///
/// Generic over `ChatRepository` and `CompletionClient` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct ChatService<R: ChatRepository, C: CompletionClient> {
    repo: R,
    completion: C,
}

impl<R: ChatRepository, C: CompletionClient> ChatService<R, C> {
    /// Create a new chat service with the given repository and
    /// completion client.
    pub fn new(repo: R, completion: C) -> Self {
        Self { repo, completion }
    }

    // --- Session lifecycle ---

    /// Create a new session. A missing or blank title falls back to
    /// the default.
    pub async fn create_session(&self, title: Option<String>) -> Result<Session, ChatError> {
        let session = Session::new(title);
        self.repo.create_session(&session).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    /// Get a session with its messages eagerly loaded, ordered by
    /// timestamp ascending.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<Session, ChatError> {
        let mut session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        session.messages = self.repo.list_messages(session_id).await?;
        Ok(session)
    }

    /// List all sessions, most recently active first.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ChatError> {
        Ok(self.repo.list_sessions().await?)
    }

    /// List favorite sessions, most recently active first.
    pub async fn list_favorite_sessions(&self) -> Result<Vec<Session>, ChatError> {
        Ok(self.repo.list_favorite_sessions().await?)
    }

    /// Case-insensitive substring search on session titles.
    pub async fn search_sessions(&self, query: &str) -> Result<Vec<Session>, ChatError> {
        Ok(self.repo.search_sessions(query).await?)
    }

    /// Apply a partial update: an omitted or blank title keeps the
    /// existing one, and the favorite flag only changes when supplied.
    /// Always bumps updated_at.
    pub async fn update_session(
        &self,
        session_id: &Uuid,
        title: Option<String>,
        is_favorite: Option<bool>,
    ) -> Result<Session, ChatError> {
        let mut session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        if let Some(title) = title {
            if !title.trim().is_empty() {
                session.title = title;
            }
        }
        if let Some(favorite) = is_favorite {
            session.is_favorite = favorite;
        }
        session.updated_at = Utc::now();

        self.repo
            .update_session(&session)
            .await
            .map_err(session_not_found)?;
        Ok(session)
    }

    /// Flip the favorite flag and bump updated_at.
    pub async fn toggle_favorite(&self, session_id: &Uuid) -> Result<Session, ChatError> {
        let mut session = self
            .repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        session.is_favorite = !session.is_favorite;
        session.updated_at = Utc::now();

        self.repo
            .update_session(&session)
            .await
            .map_err(session_not_found)?;
        info!(session_id = %session_id, favorite = session.is_favorite, "favorite toggled");
        Ok(session)
    }

    /// Delete a session and everything it owns.
    ///
    /// Existence is checked first so that messages are never deleted
    /// for an absent session; the repository then removes messages,
    /// reactions, and the session row in one transaction.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        self.repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        self.repo
            .delete_session(session_id)
            .await
            .map_err(session_not_found)?;
        info!(session_id = %session_id, "session deleted");
        Ok(())
    }

    // --- Messages ---

    /// Append a message to an existing session.
    pub async fn add_message(
        &self,
        session_id: Uuid,
        content: String,
        sender: Sender,
        message_type: MessageType,
    ) -> Result<Message, ChatError> {
        self.repo
            .get_session(&session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let message = Message::new(session_id, content, sender, message_type);
        self.repo.insert_message(&message).await?;
        Ok(message)
    }

    /// Messages for a session, oldest first.
    pub async fn list_messages(&self, session_id: &Uuid) -> Result<Vec<Message>, ChatError> {
        Ok(self.repo.list_messages(session_id).await?)
    }

    /// Persist a user message, obtain the bot reply, and persist it.
    ///
    /// When `session_id` is absent a new session is created first.
    /// The user message is committed before the completion call and
    /// deliberately stays persisted when that call fails; only the bot
    /// reply is withheld.
    pub async fn send_message(
        &self,
        session_id: Option<Uuid>,
        text: String,
    ) -> Result<ChatReply, ChatError> {
        let session = match session_id {
            Some(id) => self
                .repo
                .get_session(&id)
                .await?
                .ok_or(ChatError::SessionNotFound)?,
            None => {
                let session = Session::new(None);
                self.repo.create_session(&session).await?;
                info!(session_id = %session.id, "session auto-created for first message");
                session
            }
        };

        let user_message = Message::new(
            session.id,
            text.clone(),
            Sender::User,
            MessageType::Text,
        );
        self.repo.insert_message(&user_message).await?;

        let reply = self
            .completion
            .complete(&text, CompletionVariant::Standard)
            .await?;

        let bot_message = Message::new(session.id, reply, Sender::Bot, MessageType::Text);
        self.repo.insert_message(&bot_message).await?;

        Ok(ChatReply {
            message: bot_message,
            session_id: session.id,
        })
    }

    /// Produce a replacement bot reply for the user turn preceding
    /// `message_id`, without deleting anything.
    ///
    /// The target is flagged `is_regenerated` (its own
    /// original_message_id stays empty); the replacement carries
    /// `original_message_id = message_id`. The flag update is not
    /// rolled back when the completion call fails.
    pub async fn regenerate_message(
        &self,
        message_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Message, ChatError> {
        let target = self
            .repo
            .get_message(message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        self.repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let prior = self
            .repo
            .latest_user_message_before(session_id, target.timestamp)
            .await?
            .ok_or(ChatError::NoPriorUserMessage)?;

        self.repo
            .mark_regenerated(message_id)
            .await
            .map_err(message_not_found)?;

        let reply = self
            .completion
            .complete(&prior.content, CompletionVariant::AlternatePerspective)
            .await?;

        let mut replacement = Message::new(*session_id, reply, Sender::Bot, MessageType::Text);
        replacement.is_regenerated = true;
        replacement.original_message_id = Some(*message_id);
        self.repo.insert_message(&replacement).await?;

        info!(
            message_id = %message_id,
            replacement_id = %replacement.id,
            "message regenerated"
        );
        Ok(replacement)
    }
}

fn session_not_found(err: RepositoryError) -> ChatError {
    match err {
        RepositoryError::NotFound => ChatError::SessionNotFound,
        other => ChatError::Storage(other),
    }
}

fn message_not_found(err: RepositoryError) -> ChatError {
    match err {
        RepositoryError::NotFound => ChatError::MessageNotFound,
        other => ChatError::Storage(other),
    }
}
