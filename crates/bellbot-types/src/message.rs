use serde::{Deserialize, Serialize};

use crate::catalog::RoomType;

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in the chat thread.
///
/// Messages are never edited once they enter the history; the serialized
/// shape is also what the assistant service receives as `history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Rendered verbatim, newlines included
    pub content: String,
    /// Rooms to show as cards under the text (assistant replies only)
    #[serde(rename = "imagenes", skip_serializing_if = "Vec::is_empty", default)]
    pub room_refs: Vec<RoomType>,
    /// ISO-8601 creation time
    pub timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            room_refs: Vec::new(),
            timestamp: now_timestamp(),
        }
    }

    /// Assistant message created locally (greeting, apology, confirmation).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            room_refs: Vec::new(),
            timestamp: now_timestamp(),
        }
    }

    /// Assistant message built from a service reply; keeps the server timestamp.
    pub fn assistant_reply(
        text: impl Into<String>,
        room_refs: Vec<RoomType>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            room_refs,
            timestamp: timestamp.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// `HH:MM` for display. Falls back to the raw string if it does not parse.
    pub fn display_time(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.timestamp) {
            return dt.with_timezone(&chrono::Local).format("%H:%M").to_string();
        }
        // The assistant service sends naive local timestamps
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%H:%M").to_string();
        }
        self.timestamp.clone()
    }
}

/// Client-side timestamp (RFC 3339, UTC).
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
