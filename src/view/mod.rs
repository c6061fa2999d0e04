//! View Controller
//!
//! Connects user actions to state changes, search, transport and rendering.
//!
//! - **RenderSurface**: the injected UI, addressed by named [`Node`] regions
//! - **ViewController**: event handlers and re-rendering
//! - **MemorySurface**: headless surface for tests and embedding
//! - **TerminalSurface**: plain-text surface used by the CLI
//!
//! # Example
//!
//! ```rust,no_run
//! use creator_chat::catalog::Catalog;
//! use creator_chat::transport::{HttpChatTransport, TransportConfig};
//! use creator_chat::view::{MemorySurface, Node, ViewController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpChatTransport::new(TransportConfig::default())?;
//! let mut view = ViewController::new(MemorySurface::new(), transport, Catalog::builtin());
//! view.init();
//! view.select_creator(1)?;
//!
//! view.surface_mut().set_value(Node::MessageInput, "What phone should I buy?");
//! let outcome = view.send_message().await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

mod controller;
pub mod markup;
mod memory;
mod surface;
mod terminal;

pub use controller::{
    DebugInfo, PendingSend, SendOutcome, ViewController, COMING_SOON_NOTICE,
    CREATOR_NOT_FOUND_NOTICE, FALLBACK_REPLY,
};
pub use memory::MemorySurface;
pub use surface::{Action, Child, Fragment, Node, RenderSurface};
pub use terminal::TerminalSurface;
