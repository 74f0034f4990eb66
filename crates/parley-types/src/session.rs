//! Chat session types for Parley.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

/// A chat session grouping an ordered list of messages.
///
/// `updated_at` is bumped on every message append, title edit, or
/// favorite toggle; session listings order by it descending so the most
/// recently active conversation comes first.
///
/// Field names serialize in camelCase to match the frontend contract
/// (`createdAt`, `isFavorite`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    /// Populated on single-session reads; empty in list responses.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Session {
    /// Title used when a session is created without one.
    pub const DEFAULT_TITLE: &'static str = "New Chat";

    /// Create a new session with a generated ID and both timestamps set
    /// to now. A missing or blank title falls back to
    /// [`Session::DEFAULT_TITLE`].
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => Self::DEFAULT_TITLE.to_string(),
        };

        Self {
            id: Uuid::new_v4(),
            title,
            created_at: now,
            updated_at: now,
            is_favorite: false,
            messages: Vec::new(),
        }
    }
}
