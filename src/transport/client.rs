//! HTTP chat client
//!
//! Posts chat requests to the backend's chat endpoint with `reqwest`.
//! One call per message: no retries, no batching.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::dto::{ChatReply, ChatRequest, ChatResponseBody};
use super::error::{TransportError, TransportResult};
use super::ChatTransport;

/// Configuration for the HTTP chat client
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the backend (e.g. "http://localhost:8000")
    pub base_url: String,
    /// Path of the chat endpoint
    pub chat_path: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            chat_path: "/api/chat".to_string(),
            request_timeout_ms: 60_000,
        }
    }
}

impl TransportConfig {
    /// Full URL of the chat endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.chat_path.trim_start_matches('/')
        )
    }
}

/// Chat transport backed by an HTTP endpoint
pub struct HttpChatTransport {
    client: Client,
    endpoint: String,
}

impl HttpChatTransport {
    /// Create a new client with the given configuration
    pub fn new(config: TransportConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> TransportResult<ChatReply> {
        tracing::debug!(
            endpoint = %self.endpoint,
            creator = %request.creator,
            session_id = %request.session_id,
            "Calling chat endpoint"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(TransportError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponseBody = response.json().await.map_err(TransportError::from_body)?;

        if let Some(message) = body.error {
            return Err(TransportError::Remote(message));
        }

        let text = body.response.ok_or(TransportError::MissingReply)?;

        Ok(ChatReply {
            text,
            session_id: body.session_id,
            message_count: body.message_count,
        })
    }
}
