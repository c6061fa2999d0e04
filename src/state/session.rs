//! Chat sessions
//!
//! A session is one continuous conversation with a single creator. Choosing
//! a creator always starts a new session: fresh id, empty history.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Creator;

/// Opaque session identifier: `session_<unix millis>_<random suffix>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new identifier, unique with overwhelming probability
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "session_{}_{}",
            Utc::now().timestamp_millis(),
            &suffix[..9]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation state for the selected creator
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    creator: Option<Creator>,
    history: Vec<ChatMessage>,
}

impl Session {
    /// A session with no creator, as on first load
    pub fn new() -> Self {
        Self {
            id: SessionId::generate(),
            creator: None,
            history: Vec::new(),
        }
    }

    /// Start a fresh conversation with `creator`
    pub fn start(creator: Creator) -> Self {
        Self {
            id: SessionId::generate(),
            creator: Some(creator),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn creator(&self) -> Option<&Creator> {
        self.creator.as_ref()
    }

    /// Turns so far, oldest first
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Append a turn; history is never edited in place
    pub fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
