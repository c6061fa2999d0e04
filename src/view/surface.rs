//! Rendering surface abstraction
//!
//! The controller never touches a concrete UI. It reads and writes named
//! regions of a [`RenderSurface`] by stable identifier, which keeps the core
//! testable without a browser or terminal.

use serde::Serialize;

use crate::catalog::CreatorId;
use crate::state::Page;

/// Named regions of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Node {
    HomePage,
    CreatorPage,
    ChatPage,
    CreatorSearch,
    SearchSuggestions,
    CreatorsGrid,
    MessageInput,
    SendMessageButton,
    ChatMessages,
    LoadingOverlay,
    CreatorAvatar,
    CreatorName,
    CreatorSpecialty,
    WelcomeMessage,
    WelcomeCreatorName,
    WelcomeSpecialty,
}

impl Node {
    /// Every region the controller expects to find
    pub const ALL: [Node; 16] = [
        Node::HomePage,
        Node::CreatorPage,
        Node::ChatPage,
        Node::CreatorSearch,
        Node::SearchSuggestions,
        Node::CreatorsGrid,
        Node::MessageInput,
        Node::SendMessageButton,
        Node::ChatMessages,
        Node::LoadingOverlay,
        Node::CreatorAvatar,
        Node::CreatorName,
        Node::CreatorSpecialty,
        Node::WelcomeMessage,
        Node::WelcomeCreatorName,
        Node::WelcomeSpecialty,
    ];

    /// Stable element identifier
    pub fn id(&self) -> &'static str {
        match self {
            Node::HomePage => "homePage",
            Node::CreatorPage => "creatorPage",
            Node::ChatPage => "chatPage",
            Node::CreatorSearch => "creatorSearch",
            Node::SearchSuggestions => "searchSuggestions",
            Node::CreatorsGrid => "creatorsGrid",
            Node::MessageInput => "messageInput",
            Node::SendMessageButton => "sendMessageBtn",
            Node::ChatMessages => "chatMessages",
            Node::LoadingOverlay => "loadingOverlay",
            Node::CreatorAvatar => "creatorAvatar",
            Node::CreatorName => "creatorName",
            Node::CreatorSpecialty => "creatorSpecialty",
            Node::WelcomeMessage => "welcomeMessage",
            Node::WelcomeCreatorName => "welcomeCreatorName",
            Node::WelcomeSpecialty => "welcomeSpecialty",
        }
    }

    /// Container region of a page
    pub fn for_page(page: Page) -> Node {
        match page {
            Page::Home => Node::HomePage,
            Page::CreatorSelect => Node::CreatorPage,
            Page::Chat => Node::ChatPage,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// What activating a fragment does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectCreator(CreatorId),
}

/// A piece of rendered markup, optionally clickable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub action: Option<Action>,
}

impl Fragment {
    /// Inert markup
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            action: None,
        }
    }

    /// Markup that triggers `action` when activated
    pub fn with_action(html: impl Into<String>, action: Action) -> Self {
        Self {
            html: html.into(),
            action: Some(action),
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.action.is_some()
    }
}

/// Child content of a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// An existing region, kept in place
    Node(Node),
    /// Newly rendered markup
    Fragment(Fragment),
}

/// Operations the controller performs on the UI
pub trait RenderSurface {
    /// Show or hide a region
    fn set_visible(&mut self, node: Node, visible: bool);

    /// Replace the text content of a region
    fn set_text(&mut self, node: Node, text: &str);

    /// Replace the children of a region
    fn set_children(&mut self, node: Node, children: Vec<Child>);

    /// Current value of an input region
    fn read_value(&self, node: Node) -> String;

    /// Move input focus to a region
    fn focus(&mut self, node: Node);

    /// Blocking notice to the user
    fn notify(&mut self, message: &str);

    /// Whether the region exists on this surface
    fn contains(&self, _node: Node) -> bool {
        true
    }
}
