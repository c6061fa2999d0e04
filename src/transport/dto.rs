//! Chat endpoint request/response bodies

use serde::{Deserialize, Serialize};

use crate::catalog::Creator;
use crate::state::SessionId;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Creator display name
    pub creator: String,
    pub system_prompt: String,
    pub session_id: SessionId,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, creator: &Creator, session_id: &SessionId) -> Self {
        Self {
            message: message.into(),
            creator: creator.name.clone(),
            system_prompt: system_prompt(creator),
            session_id: session_id.clone(),
        }
    }
}

/// Instructions asking the backend to role-play `creator` and keep context
pub fn system_prompt(creator: &Creator) -> String {
    let description = creator.description.trim().trim_end_matches('.');

    format!(
        "You are {}, a {} expert. {}. Respond as this character would, being helpful and \
         knowledgeable in your field. Remember our conversation context and refer to previous \
         messages when relevant.",
        creator.name, creator.specialty, description
    )
}

/// Raw response body; success and error shapes share one struct
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatResponseBody {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message_count: Option<u64>,
}

/// A successful reply from the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Assistant text (markdown)
    pub text: String,
    /// Session id as echoed by the server
    pub session_id: Option<String>,
    /// Number of messages the server holds for this session
    pub message_count: Option<u64>,
}
