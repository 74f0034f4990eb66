//! Chat message and reaction types for Parley.
//!
//! Messages are the turns of a conversation, authored by either the
//! user or the bot. Regeneration never deletes a message: the original
//! is flagged and the replacement points back at it via
//! `original_message_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Author of a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// Content kind of a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (message_type IN ('text', 'code', 'image', 'link'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Code,
    Image,
    Link,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Text => write!(f, "text"),
            MessageType::Code => write!(f, "code"),
            MessageType::Image => write!(f, "image"),
            MessageType::Link => write!(f, "link"),
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "code" => Ok(MessageType::Code),
            "image" => Ok(MessageType::Image),
            "link" => Ok(MessageType::Link),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// Preview metadata attached to link messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub domain: Option<String>,
}

/// A single turn within a chat session.
///
/// Messages are ordered by `timestamp` within a session. The
/// `is_regenerated` flag transitions false -> true exactly once and
/// never back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    pub is_typing: bool,
    pub is_favorite: bool,
    pub is_regenerated: bool,
    /// Set on replacement messages only, pointing at the message they
    /// supersede.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_message_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview: Option<LinkPreview>,
    /// Language tag for code messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Create a new message with a generated ID and timestamp set to now.
    ///
    /// Flags start false; preview and language fields start empty.
    pub fn new(
        session_id: Uuid,
        content: String,
        sender: Sender,
        message_type: MessageType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            content,
            sender,
            timestamp: Utc::now(),
            message_type,
            is_typing: false,
            is_favorite: false,
            is_regenerated: false,
            original_message_id: None,
            link_preview: None,
            code_language: None,
            reactions: Vec::new(),
        }
    }
}

/// An emoji reaction attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: Uuid,
    pub message_id: Uuid,
    pub emoji: String,
    pub count: i64,
    /// Reacting user identifiers, serialized as a JSON array string.
    pub users: String,
}

impl Reaction {
    /// Create a reaction with a generated ID and a single reacting user.
    pub fn new(message_id: Uuid, emoji: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id,
            emoji,
            count: 1,
            users: "[]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("robot".parse::<Sender>().is_err());
    }

    #[test]
    fn test_message_type_roundtrip() {
        for kind in [
            MessageType::Text,
            MessageType::Code,
            MessageType::Image,
            MessageType::Link,
        ] {
            let s = kind.to_string();
            let parsed: MessageType = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
        assert!("video".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_message_type_default_is_text() {
        assert_eq!(MessageType::default(), MessageType::Text);
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: Sender = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Sender::User);
    }

    #[test]
    fn test_new_message_initial_state() {
        let session_id = Uuid::new_v4();
        let msg = Message::new(
            session_id,
            "Hello".to_string(),
            Sender::User,
            MessageType::Text,
        );
        assert_eq!(msg.session_id, session_id);
        assert!(!msg.is_typing);
        assert!(!msg.is_favorite);
        assert!(!msg.is_regenerated);
        assert!(msg.original_message_id.is_none());
        assert!(msg.reactions.is_empty());
    }

    #[test]
    fn test_message_serializes_camel_case_and_skips_empty_options() {
        let msg = Message::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            Sender::Bot,
            MessageType::Text,
        );
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sessionId\""));
        assert!(json.contains("\"messageType\":\"text\""));
        assert!(json.contains("\"isRegenerated\":false"));
        assert!(!json.contains("originalMessageId"));
        assert!(!json.contains("linkPreview"));
    }

    #[test]
    fn test_replacement_message_serializes_original_id() {
        let original_id = Uuid::new_v4();
        let mut msg = Message::new(
            Uuid::new_v4(),
            "Take two".to_string(),
            Sender::Bot,
            MessageType::Text,
        );
        msg.is_regenerated = true;
        msg.original_message_id = Some(original_id);

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"isRegenerated\":true"));
        assert!(json.contains(&format!("\"originalMessageId\":\"{original_id}\"")));
    }
}
