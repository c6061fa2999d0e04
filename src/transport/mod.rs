//! Chat Transport
//!
//! The network exchange with the backend chat endpoint.
//!
//! - **ChatTransport**: the seam the view controller calls through
//! - **HttpChatTransport**: `reqwest` implementation for `POST /api/chat`
//! - **TransportError**: typed failures (status, payload, network)
//!
//! The transport reports what went wrong; turning failures into a chat
//! message is the controller's business.

mod client;
mod dto;
mod error;

pub use client::{HttpChatTransport, TransportConfig};
pub use dto::{system_prompt, ChatReply, ChatRequest};
pub use error::{TransportError, TransportErrorKind, TransportResult};

use async_trait::async_trait;

/// Sends one chat request and resolves to the reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue exactly one call for `request`
    async fn send(&self, request: &ChatRequest) -> TransportResult<ChatReply>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for std::sync::Arc<T> {
    async fn send(&self, request: &ChatRequest) -> TransportResult<ChatReply> {
        (**self).send(request).await
    }
}
