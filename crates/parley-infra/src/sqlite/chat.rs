//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, and writer-pool
//! transactions for the multi-statement mutations (message insert +
//! session bump, session delete + cascade).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use parley_core::chat::repository::ChatRepository;
use parley_types::error::RepositoryError;
use parley_types::message::{LinkPreview, Message, MessageType, Reaction, Sender};
use parley_types::session::Session;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Session.
struct SessionRow {
    id: String,
    title: String,
    created_at: String,
    updated_at: String,
    is_favorite: i64,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_favorite: row.try_get("is_favorite")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Session {
            id,
            title: self.title,
            created_at,
            updated_at,
            is_favorite: self.is_favorite != 0,
            messages: Vec::new(),
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    session_id: String,
    content: String,
    sender: String,
    timestamp: String,
    message_type: String,
    is_typing: i64,
    is_favorite: i64,
    is_regenerated: i64,
    original_message_id: Option<String>,
    link_title: Option<String>,
    link_description: Option<String>,
    link_image: Option<String>,
    link_url: Option<String>,
    link_domain: Option<String>,
    code_language: Option<String>,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            content: row.try_get("content")?,
            sender: row.try_get("sender")?,
            timestamp: row.try_get("timestamp")?,
            message_type: row.try_get("message_type")?,
            is_typing: row.try_get("is_typing")?,
            is_favorite: row.try_get("is_favorite")?,
            is_regenerated: row.try_get("is_regenerated")?,
            original_message_id: row.try_get("original_message_id")?,
            link_title: row.try_get("link_title")?,
            link_description: row.try_get("link_description")?,
            link_image: row.try_get("link_image")?,
            link_url: row.try_get("link_url")?,
            link_domain: row.try_get("link_domain")?,
            code_language: row.try_get("code_language")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let message_type: MessageType = self
            .message_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let timestamp = parse_datetime(&self.timestamp)?;
        let original_message_id = self
            .original_message_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid original_message_id: {e}")))?;

        let has_preview = self.link_title.is_some()
            || self.link_description.is_some()
            || self.link_image.is_some()
            || self.link_url.is_some()
            || self.link_domain.is_some();
        let link_preview = has_preview.then(|| LinkPreview {
            title: self.link_title,
            description: self.link_description,
            image: self.link_image,
            url: self.link_url,
            domain: self.link_domain,
        });

        Ok(Message {
            id,
            session_id,
            content: self.content,
            sender,
            timestamp,
            message_type,
            is_typing: self.is_typing != 0,
            is_favorite: self.is_favorite != 0,
            is_regenerated: self.is_regenerated != 0,
            original_message_id,
            link_preview,
            code_language: self.code_language,
            reactions: Vec::new(),
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Reaction.
struct ReactionRow {
    id: String,
    message_id: String,
    emoji: String,
    count: i64,
    users: String,
}

impl ReactionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            message_id: row.try_get("message_id")?,
            emoji: row.try_get("emoji")?,
            count: row.try_get("count")?,
            users: row.try_get("users")?,
        })
    }

    fn into_reaction(self) -> Result<Reaction, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid reaction id: {e}")))?;
        let message_id = Uuid::parse_str(&self.message_id)
            .map_err(|e| RepositoryError::Query(format!("invalid message_id: {e}")))?;

        Ok(Reaction {
            id,
            message_id,
            emoji: self.emoji,
            count: self.count,
            users: self.users,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Foreign key violations mean the referenced row is gone; surface that
/// as NotFound rather than a generic query failure.
fn insert_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.message().contains("FOREIGN KEY constraint failed") => {
            RepositoryError::NotFound
        }
        _ => RepositoryError::Query(e.to_string()),
    }
}

fn sessions_from_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Session>, RepositoryError> {
    let mut sessions = Vec::with_capacity(rows.len());
    for row in rows {
        let session_row = SessionRow::from_row(row).map_err(query_error)?;
        sessions.push(session_row.into_session()?);
    }
    Ok(sessions)
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &Session) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO sessions (id, title, created_at, updated_at, is_favorite)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.title)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .bind(session.is_favorite as i64)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row).map_err(query_error)?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM sessions ORDER BY updated_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        sessions_from_rows(&rows)
    }

    async fn list_favorite_sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM sessions WHERE is_favorite = 1 ORDER BY updated_at DESC")
                .fetch_all(&self.pool.reader)
                .await
                .map_err(query_error)?;

        sessions_from_rows(&rows)
    }

    async fn search_sessions(&self, query: &str) -> Result<Vec<Session>, RepositoryError> {
        // SQLite LIKE is case-insensitive for ASCII.
        let rows = sqlx::query("SELECT * FROM sessions WHERE title LIKE ? ORDER BY updated_at DESC")
            .bind(format!("%{query}%"))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        sessions_from_rows(&rows)
    }

    async fn update_session(&self, session: &Session) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE sessions
               SET title = ?, updated_at = ?, is_favorite = ?
               WHERE id = ?"#,
        )
        .bind(&session.title)
        .bind(format_datetime(&session.updated_at))
        .bind(session.is_favorite as i64)
        .bind(session.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query(
            r#"DELETE FROM reactions
               WHERE message_id IN (SELECT id FROM messages WHERE session_id = ?)"#,
        )
        .bind(session_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls the message deletes back.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn insert_message(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query(
            r#"INSERT INTO messages (id, session_id, content, sender, timestamp, message_type,
                                     is_typing, is_favorite, is_regenerated, original_message_id,
                                     link_title, link_description, link_image, link_url,
                                     link_domain, code_language)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(&message.content)
        .bind(message.sender.to_string())
        .bind(format_datetime(&message.timestamp))
        .bind(message.message_type.to_string())
        .bind(message.is_typing as i64)
        .bind(message.is_favorite as i64)
        .bind(message.is_regenerated as i64)
        .bind(message.original_message_id.map(|id| id.to_string()))
        .bind(message.link_preview.as_ref().and_then(|p| p.title.clone()))
        .bind(
            message
                .link_preview
                .as_ref()
                .and_then(|p| p.description.clone()),
        )
        .bind(message.link_preview.as_ref().and_then(|p| p.image.clone()))
        .bind(message.link_preview.as_ref().and_then(|p| p.url.clone()))
        .bind(message.link_preview.as_ref().and_then(|p| p.domain.clone()))
        .bind(&message.code_language)
        .execute(&mut *tx)
        .await
        .map_err(insert_error)?;

        // Every append refreshes the owning session's activity time.
        let result = sqlx::query("UPDATE sessions SET updated_at = ? WHERE id = ?")
            .bind(format_datetime(&message.timestamp))
            .bind(message.session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn get_message(&self, message_id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(message_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let msg_row = MessageRow::from_row(&row).map_err(query_error)?;
                let mut message = msg_row.into_message()?;
                message.reactions = self.list_reactions(message_id).await?;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    async fn list_messages(&self, session_id: &Uuid) -> Result<Vec<Message>, RepositoryError> {
        // rowid breaks timestamp ties, keeping insertion order stable.
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE session_id = ? ORDER BY timestamp ASC, rowid ASC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = MessageRow::from_row(row).map_err(query_error)?;
            messages.push(msg_row.into_message()?);
        }

        // Hydrate reactions for the whole session in one query.
        let reaction_rows = sqlx::query(
            r#"SELECT r.* FROM reactions r
               JOIN messages m ON m.id = r.message_id
               WHERE m.session_id = ?
               ORDER BY r.rowid ASC"#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut by_message: HashMap<Uuid, Vec<Reaction>> = HashMap::new();
        for row in &reaction_rows {
            let reaction = ReactionRow::from_row(row)
                .map_err(query_error)?
                .into_reaction()?;
            by_message.entry(reaction.message_id).or_default().push(reaction);
        }

        for message in &mut messages {
            if let Some(reactions) = by_message.remove(&message.id) {
                message.reactions = reactions;
            }
        }

        Ok(messages)
    }

    async fn latest_user_message_before(
        &self,
        session_id: &Uuid,
        before: DateTime<Utc>,
    ) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM messages
               WHERE session_id = ? AND sender = 'user' AND timestamp < ?
               ORDER BY timestamp DESC, rowid DESC
               LIMIT 1"#,
        )
        .bind(session_id.to_string())
        .bind(format_datetime(&before))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        match row {
            Some(row) => {
                let msg_row = MessageRow::from_row(&row).map_err(query_error)?;
                Ok(Some(msg_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn mark_regenerated(&self, message_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE messages SET is_regenerated = 1 WHERE id = ?")
            .bind(message_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn insert_reaction(&self, reaction: &Reaction) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO reactions (id, message_id, emoji, count, users)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(reaction.id.to_string())
        .bind(reaction.message_id.to_string())
        .bind(&reaction.emoji)
        .bind(reaction.count)
        .bind(&reaction.users)
        .execute(&self.pool.writer)
        .await
        .map_err(insert_error)?;

        Ok(())
    }

    async fn list_reactions(&self, message_id: &Uuid) -> Result<Vec<Reaction>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM reactions WHERE message_id = ? ORDER BY rowid ASC")
            .bind(message_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut reactions = Vec::with_capacity(rows.len());
        for row in &rows {
            let reaction_row = ReactionRow::from_row(row).map_err(query_error)?;
            reactions.push(reaction_row.into_reaction()?);
        }

        Ok(reactions)
    }
}
