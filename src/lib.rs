//! # Creator Chat
//!
//! Front end for chatting with AI personas modeled on tech content creators.
//! A user picks a creator from a catalog, then exchanges messages with a
//! backend chat endpoint; replies are rendered from a small markdown subset.
//!
//! ## Modules
//!
//! - [`catalog`]: the creator personas
//! - [`search`]: suggestion filter over the catalog
//! - [`markdown`]: markdown subset to markup
//! - [`state`]: page navigation and the chat session
//! - [`transport`]: the HTTP chat exchange
//! - [`view`]: controller over an injected rendering surface
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use creator_chat::{Config, HttpChatTransport, MemorySurface, Node, ViewController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let transport = HttpChatTransport::new(config.transport_config())?;
//!
//!     let mut view = ViewController::new(MemorySurface::new(), transport, config.catalog()?);
//!     view.init();
//!     view.select_creator(4)?;
//!
//!     view.surface_mut().set_value(Node::MessageInput, "Will it bend?");
//!     view.send_message().await;
//!
//!     for message in view.state().session().history() {
//!         println!("{:?}: {}", message.role, message.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod markdown;
pub mod search;
pub mod state;
pub mod transport;
pub mod view;

pub use catalog::{Catalog, CatalogError, Creator, CreatorId};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig};

pub use search::Suggestions;

pub use state::{
    AppState, ChatMessage, Page, Role, RoleOutcome, Session, SessionId, UserRole,
    ValidationError, ValidationResult,
};

pub use transport::{
    ChatReply, ChatRequest, ChatTransport, HttpChatTransport, TransportConfig, TransportError,
    TransportErrorKind, TransportResult,
};

pub use view::{
    DebugInfo, MemorySurface, Node, RenderSurface, SendOutcome, TerminalSurface, ViewController,
};
