//! View Controller
//!
//! Wires user actions to the state machine, the search filter and the chat
//! transport, and re-renders the surface after each one. The controller
//! owns the application state; every failure is handled here and the app
//! stays interactive.

use serde::Serialize;

use crate::catalog::{Catalog, Creator, CreatorId};
use crate::search::{self, Suggestions};
use crate::state::{
    AppState, ChatMessage, Page, RoleOutcome, SessionId, UserRole, ValidationError,
    ValidationResult,
};
use crate::transport::{ChatReply, ChatRequest, ChatTransport, TransportErrorKind, TransportResult};

use super::markup;
use super::surface::{Action, Child, Node, RenderSurface};

/// Assistant turn shown for any failed chat call
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Notice for the not-yet-available creator role
pub const COMING_SOON_NOTICE: &str = "Creator mode coming soon!";

/// Notice for a selection that matches no creator
pub const CREATOR_NOT_FOUND_NOTICE: &str = "Creator not found!";

/// How a send attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent
    Ignored(ValidationError),
    /// The reply was appended to the session
    Replied,
    /// The call failed; the fallback reply was appended
    Failed(TransportErrorKind),
    /// The session changed while the call was in flight; the result was dropped
    Discarded,
}

/// A chat call that has been issued but not yet completed
#[derive(Debug, Clone)]
pub struct PendingSend {
    session_id: SessionId,
    request: ChatRequest,
}

impl PendingSend {
    /// Session the call was issued under
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Serializable snapshot of the controller state
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    pub page: Page,
    pub role: Option<UserRole>,
    pub creator: Option<Creator>,
    pub session_id: SessionId,
    pub history_len: usize,
    pub missing_regions: Vec<Node>,
}

/// Drives a [`RenderSurface`] from user actions
pub struct ViewController<S, T> {
    surface: S,
    transport: T,
    catalog: Catalog,
    state: AppState,
}

impl<S: RenderSurface, T: ChatTransport> ViewController<S, T> {
    pub fn new(surface: S, transport: T, catalog: Catalog) -> Self {
        Self {
            surface,
            transport,
            catalog,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Render the initial view: home page plus the catalog grid
    pub fn init(&mut self) {
        tracing::info!("Initializing app");

        for node in self.missing_regions() {
            tracing::error!(region = %node, "Region not found on surface");
        }

        self.navigate(Page::Home);
        self.populate_creators_grid();

        tracing::info!("App initialized");
    }

    /// Regions the surface does not provide
    pub fn missing_regions(&self) -> Vec<Node> {
        Node::ALL
            .iter()
            .copied()
            .filter(|node| !self.surface.contains(*node))
            .collect()
    }

    /// Show a page by name; unknown names change nothing
    pub fn show_page(&mut self, name: &str) -> ValidationResult<Page> {
        let page = name.parse::<Page>().map_err(|e| {
            tracing::error!(page = %name, "Unknown page");
            e
        })?;

        self.navigate(page);
        Ok(page)
    }

    /// Activate `page` and hide the others
    pub fn navigate(&mut self, page: Page) {
        let previous = self.state.show(page);
        tracing::info!(from = %previous, to = %page, "Showing page");

        self.render_visibility(page);

        if page == Page::CreatorSelect {
            self.populate_creators_grid();
        }
    }

    /// Apply a role choice made on the home page
    pub fn select_role(&mut self, role: UserRole) -> RoleOutcome {
        tracing::info!(?role, "Role selected");

        let outcome = self.state.select_role(role);
        match outcome {
            RoleOutcome::Navigated(page) => {
                self.render_visibility(page);
                if page == Page::CreatorSelect {
                    self.populate_creators_grid();
                }
            }
            RoleOutcome::ComingSoon => self.surface.notify(COMING_SOON_NOTICE),
        }
        outcome
    }

    /// Start a new session with creator `id` and open the chat page
    pub fn select_creator(&mut self, id: CreatorId) -> ValidationResult<()> {
        let creator = match self.catalog.get(id) {
            Some(creator) => creator.clone(),
            None => {
                tracing::error!(creator_id = id, "Creator not found");
                self.surface.notify(CREATOR_NOT_FOUND_NOTICE);
                return Err(ValidationError::UnknownCreator(id));
            }
        };

        tracing::info!(creator = %creator.name, "Creator selected");

        let session_id = self.state.start_session(creator.clone()).id().clone();
        tracing::info!(session_id = %session_id, "New session started");

        self.update_chat_interface(&creator);
        self.render_visibility(Page::Chat);
        self.surface.focus(Node::MessageInput);

        Ok(())
    }

    /// Run the action attached to a clicked fragment
    pub fn activate(&mut self, action: Action) -> ValidationResult<()> {
        match action {
            Action::SelectCreator(id) => self.select_creator(id),
        }
    }

    /// Render one card per creator into the grid
    pub fn populate_creators_grid(&mut self) {
        let cards: Vec<Child> = self
            .catalog
            .iter()
            .map(|creator| Child::Fragment(markup::creator_card(creator)))
            .collect();

        tracing::debug!(count = cards.len(), "Populating creators grid");
        self.surface.set_children(Node::CreatorsGrid, cards);
    }

    /// Re-filter suggestions from the current search box value
    pub fn handle_search(&mut self) {
        let query = self.surface.read_value(Node::CreatorSearch);

        match search::suggest(&self.catalog, &query) {
            Suggestions::Hidden => {
                self.surface.set_visible(Node::SearchSuggestions, false);
                return;
            }
            Suggestions::NoResults => {
                self.surface.set_children(
                    Node::SearchSuggestions,
                    vec![Child::Fragment(markup::no_results_item())],
                );
            }
            Suggestions::Matches(creators) => {
                let items = creators
                    .into_iter()
                    .map(|creator| Child::Fragment(markup::suggestion_item(creator)))
                    .collect();
                self.surface.set_children(Node::SearchSuggestions, items);
            }
        }

        self.surface.set_visible(Node::SearchSuggestions, true);
    }

    /// Search box gained focus: re-show suggestions if it holds text
    pub fn search_focus(&mut self) {
        if !self.surface.read_value(Node::CreatorSearch).trim().is_empty() {
            self.surface.set_visible(Node::SearchSuggestions, true);
        }
    }

    /// Search box lost focus
    ///
    /// Hides at once; a front end that needs clicks on suggestions to land
    /// first delays this call itself.
    pub fn search_blur(&mut self) {
        self.surface.set_visible(Node::SearchSuggestions, false);
    }

    /// Send the message input's text and append the outcome to the chat
    pub async fn send_message(&mut self) -> SendOutcome {
        let pending = match self.begin_send() {
            Ok(pending) => pending,
            Err(e) => return SendOutcome::Ignored(e),
        };

        let result = self.transport.send(pending.request()).await;
        self.complete_send(pending, result)
    }

    /// First half of a send: validate, record the user turn, show loading
    ///
    /// Empty input is ignored without touching history or the network.
    pub fn begin_send(&mut self) -> ValidationResult<PendingSend> {
        let text = self.surface.read_value(Node::MessageInput).trim().to_string();
        if text.is_empty() {
            tracing::debug!("Ignoring empty message");
            return Err(ValidationError::EmptyMessage);
        }

        let creator = match self.state.session().creator() {
            Some(creator) => creator.clone(),
            None => {
                tracing::warn!("Message sent without a selected creator");
                return Err(ValidationError::NoActiveCreator);
            }
        };

        let session_id = self.state.session().id().clone();
        tracing::info!(session_id = %session_id, "Sending message");

        self.state.session_mut().push(ChatMessage::user(text.as_str()));
        self.render_messages();
        self.surface.set_text(Node::MessageInput, "");
        self.surface.set_visible(Node::LoadingOverlay, true);

        let request = ChatRequest::new(text, &creator, &session_id);
        Ok(PendingSend {
            session_id,
            request,
        })
    }

    /// Second half of a send: hide loading and append the reply or fallback
    ///
    /// Results for a session that has since been replaced are dropped.
    pub fn complete_send(
        &mut self,
        pending: PendingSend,
        result: TransportResult<ChatReply>,
    ) -> SendOutcome {
        self.surface.set_visible(Node::LoadingOverlay, false);

        if pending.session_id != *self.state.session().id() {
            tracing::warn!(
                issued_for = %pending.session_id,
                current = %self.state.session().id(),
                "Dropping reply for a previous session"
            );
            return SendOutcome::Discarded;
        }

        let (message, outcome) = match result {
            Ok(reply) => {
                tracing::info!(
                    message_count = ?reply.message_count,
                    server_session = ?reply.session_id,
                    "Reply received"
                );
                (ChatMessage::assistant(reply.text), SendOutcome::Replied)
            }
            Err(err) => {
                tracing::error!(kind = %err.kind(), error = %err, "Chat request failed");
                (
                    ChatMessage::assistant(FALLBACK_REPLY),
                    SendOutcome::Failed(err.kind()),
                )
            }
        };

        self.state.session_mut().push(message);
        self.render_messages();
        outcome
    }

    /// Snapshot of the current state for troubleshooting
    pub fn debug_info(&self) -> DebugInfo {
        let session = self.state.session();
        DebugInfo {
            page: self.state.page(),
            role: self.state.role(),
            creator: session.creator().cloned(),
            session_id: session.id().clone(),
            history_len: session.history().len(),
            missing_regions: self.missing_regions(),
        }
    }

    fn render_visibility(&mut self, active: Page) {
        for page in Page::all() {
            self.surface.set_visible(Node::for_page(*page), *page == active);
        }
    }

    fn update_chat_interface(&mut self, creator: &Creator) {
        self.surface.set_children(
            Node::CreatorAvatar,
            vec![Child::Fragment(markup::avatar_image(creator))],
        );
        self.surface.set_text(Node::CreatorName, &creator.name);
        self.surface.set_text(Node::CreatorSpecialty, &creator.specialty);
        self.surface.set_text(Node::WelcomeCreatorName, &creator.name);
        self.surface.set_text(Node::WelcomeSpecialty, &creator.specialty);

        self.render_messages();
    }

    /// Welcome node followed by one bubble per history entry
    fn render_messages(&mut self) {
        let session = self.state.session();
        let creator = session.creator();

        let children: Vec<Child> = std::iter::once(Child::Node(Node::WelcomeMessage))
            .chain(
                session
                    .history()
                    .iter()
                    .map(|message| Child::Fragment(markup::chat_message(message, creator))),
            )
            .collect();

        self.surface.set_children(Node::ChatMessages, children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Role;
    use crate::transport::TransportError;
    use crate::view::MemorySurface;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport that replays canned results and records requests
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<TransportResult<ChatReply>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedTransport {
        fn replying(results: Vec<TransportResult<ChatReply>>) -> Self {
            Self {
                replies: Mutex::new(results.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send(&self, request: &ChatRequest) -> TransportResult<ChatReply> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::Unavailable))
        }
    }

    fn reply(text: &str) -> TransportResult<ChatReply> {
        Ok(ChatReply {
            text: text.to_string(),
            session_id: None,
            message_count: Some(2),
        })
    }

    fn controller(
        results: Vec<TransportResult<ChatReply>>,
    ) -> ViewController<MemorySurface, ScriptedTransport> {
        let mut controller = ViewController::new(
            MemorySurface::new(),
            ScriptedTransport::replying(results),
            Catalog::builtin(),
        );
        controller.init();
        controller
    }

    fn visible_pages(controller: &ViewController<MemorySurface, ScriptedTransport>) -> Vec<Node> {
        [Node::HomePage, Node::CreatorPage, Node::ChatPage]
            .into_iter()
            .filter(|node| controller.surface().is_visible(*node))
            .collect()
    }

    #[test]
    fn test_init_shows_home_and_grid() {
        let controller = controller(vec![]);
        assert_eq!(visible_pages(&controller), vec![Node::HomePage]);
        assert_eq!(controller.surface().fragments(Node::CreatorsGrid).len(), 5);
        assert!(controller.missing_regions().is_empty());
    }

    #[test]
    fn test_page_exclusivity() {
        let mut controller = controller(vec![]);

        for (name, node) in [
            ("creator", Node::CreatorPage),
            ("chat", Node::ChatPage),
            ("home", Node::HomePage),
            ("creatorSelect", Node::CreatorPage),
        ] {
            controller.show_page(name).unwrap();
            assert_eq!(visible_pages(&controller), vec![node]);
        }
    }

    #[test]
    fn test_unknown_page_leaves_visibility() {
        let mut controller = controller(vec![]);
        controller.show_page("creator").unwrap();

        let err = controller.show_page("settings").unwrap_err();
        assert_eq!(err, ValidationError::UnknownPage("settings".to_string()));
        assert_eq!(visible_pages(&controller), vec![Node::CreatorPage]);
        assert_eq!(controller.state().page(), Page::CreatorSelect);
    }

    #[test]
    fn test_select_role() {
        let mut controller = controller(vec![]);

        assert_eq!(controller.select_role(UserRole::Creator), RoleOutcome::ComingSoon);
        assert_eq!(visible_pages(&controller), vec![Node::HomePage]);
        assert_eq!(controller.surface().notices(), &[COMING_SOON_NOTICE.to_string()]);

        assert_eq!(
            controller.select_role(UserRole::User),
            RoleOutcome::Navigated(Page::CreatorSelect)
        );
        assert_eq!(visible_pages(&controller), vec![Node::CreatorPage]);
        assert_eq!(controller.state().role(), Some(UserRole::User));
    }

    #[test]
    fn test_select_creator_populates_header() {
        let mut controller = controller(vec![]);
        controller.select_role(UserRole::User);

        for creator in Catalog::builtin().iter() {
            controller.select_creator(creator.id).unwrap();
            let surface = controller.surface();

            assert_eq!(visible_pages(&controller), vec![Node::ChatPage]);
            assert_eq!(surface.text(Node::CreatorName), Some(creator.name.as_str()));
            assert_eq!(surface.text(Node::CreatorSpecialty), Some(creator.specialty.as_str()));
            assert_eq!(surface.text(Node::WelcomeCreatorName), Some(creator.name.as_str()));
            assert!(surface.fragments(Node::CreatorAvatar)[0]
                .html
                .contains(&creator.avatar));
            assert_eq!(surface.children(Node::ChatMessages), &[Child::Node(Node::WelcomeMessage)]);
            assert_eq!(surface.focused(), Some(Node::MessageInput));
        }
    }

    #[test]
    fn test_unknown_creator_changes_nothing() {
        let mut controller = controller(vec![]);
        controller.select_role(UserRole::User);
        let session_before = controller.state().session().id().clone();

        let err = controller.select_creator(99).unwrap_err();
        assert_eq!(err, ValidationError::UnknownCreator(99));
        assert_eq!(visible_pages(&controller), vec![Node::CreatorPage]);
        assert_eq!(controller.state().session().id(), &session_before);
        assert_eq!(
            controller.surface().notices(),
            &[CREATOR_NOT_FOUND_NOTICE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_reselect_resets_session() {
        let mut controller = controller(vec![reply("hi")]);
        controller.select_creator(1).unwrap();
        let first = controller.state().session().id().clone();

        controller.surface_mut().set_value(Node::MessageInput, "hello");
        assert_eq!(controller.send_message().await, SendOutcome::Replied);
        assert_eq!(controller.state().session().history().len(), 2);

        controller.select_creator(2).unwrap();
        assert_ne!(controller.state().session().id(), &first);
        assert!(controller.state().session().history().is_empty());
        assert_eq!(
            controller.surface().children(Node::ChatMessages),
            &[Child::Node(Node::WelcomeMessage)]
        );
    }

    #[test]
    fn test_search_states() {
        let mut controller = controller(vec![]);

        controller.surface_mut().set_value(Node::CreatorSearch, "");
        controller.handle_search();
        assert!(!controller.surface().is_visible(Node::SearchSuggestions));

        controller.surface_mut().set_value(Node::CreatorSearch, "Unbox");
        controller.handle_search();
        let items = controller.surface().fragments(Node::SearchSuggestions);
        assert!(controller.surface().is_visible(Node::SearchSuggestions));
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.is_selectable()));

        controller.surface_mut().set_value(Node::CreatorSearch, "gardening");
        controller.handle_search();
        let items = controller.surface().fragments(Node::SearchSuggestions);
        assert!(controller.surface().is_visible(Node::SearchSuggestions));
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_selectable());
    }

    #[test]
    fn test_search_focus_and_blur() {
        let mut controller = controller(vec![]);

        controller.search_focus();
        assert!(!controller.surface().is_visible(Node::SearchSuggestions));

        controller.surface_mut().set_value(Node::CreatorSearch, "zack");
        controller.search_focus();
        assert!(controller.surface().is_visible(Node::SearchSuggestions));

        controller.search_blur();
        assert!(!controller.surface().is_visible(Node::SearchSuggestions));
    }

    #[test]
    fn test_suggestion_action_selects_creator() {
        let mut controller = controller(vec![]);
        controller.surface_mut().set_value(Node::CreatorSearch, "jerry");
        controller.handle_search();

        let action = controller.surface().fragments(Node::SearchSuggestions)[0]
            .action
            .unwrap();
        controller.activate(action).unwrap();
        assert_eq!(controller.state().session().creator().map(|c| c.id), Some(4));
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let mut controller = controller(vec![reply("never")]);
        controller.select_creator(1).unwrap();
        controller.surface_mut().set_value(Node::MessageInput, "   ");

        let outcome = controller.send_message().await;
        assert_eq!(outcome, SendOutcome::Ignored(ValidationError::EmptyMessage));
        assert_eq!(controller.transport().calls(), 0);
        assert!(controller.state().session().history().is_empty());
        assert!(!controller.surface().is_visible(Node::LoadingOverlay));
    }

    #[tokio::test]
    async fn test_send_without_creator_is_ignored() {
        let mut controller = controller(vec![]);
        controller.surface_mut().set_value(Node::MessageInput, "hello?");

        let outcome = controller.send_message().await;
        assert_eq!(outcome, SendOutcome::Ignored(ValidationError::NoActiveCreator));
        assert_eq!(controller.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_send() {
        let mut controller = controller(vec![reply("**Yes**, it bends.")]);
        controller.select_creator(4).unwrap();
        controller.surface_mut().set_value(Node::MessageInput, "  Will it bend?  ");

        assert_eq!(controller.send_message().await, SendOutcome::Replied);

        let history = controller.state().session().history();
        assert_eq!(history[0], ChatMessage::user("Will it bend?"));
        assert_eq!(history[1], ChatMessage::assistant("**Yes**, it bends."));

        let request = controller.transport().requests.lock().unwrap()[0].clone();
        assert_eq!(request.message, "Will it bend?");
        assert_eq!(request.creator, "Zack Nelson");
        assert_eq!(&request.session_id, controller.state().session().id());

        let surface = controller.surface();
        assert_eq!(surface.read_value(Node::MessageInput), "");
        assert!(!surface.is_visible(Node::LoadingOverlay));

        let bubbles = surface.fragments(Node::ChatMessages);
        assert_eq!(bubbles.len(), 2);
        assert!(bubbles[1].html.contains("<strong>Yes</strong>"));
        assert!(bubbles[1].html.contains(">ZN</button>"));
    }

    #[tokio::test]
    async fn test_failures_append_single_fallback() {
        let failures = vec![
            Err(TransportError::Status {
                status: 500,
                body: String::new(),
            }),
            Err(TransportError::Remote("overloaded".to_string())),
            Err(TransportError::Unavailable),
        ];
        let expected_kinds = [
            TransportErrorKind::Status,
            TransportErrorKind::Payload,
            TransportErrorKind::Network,
        ];

        let mut controller = controller(failures);
        controller.select_creator(3).unwrap();

        for (i, kind) in expected_kinds.into_iter().enumerate() {
            controller.surface_mut().set_value(Node::MessageInput, "hello");
            assert_eq!(controller.send_message().await, SendOutcome::Failed(kind));

            let history = controller.state().session().history();
            assert_eq!(history.len(), (i + 1) * 2);
            assert_eq!(history.last(), Some(&ChatMessage::assistant(FALLBACK_REPLY)));
            let fallbacks = history
                .iter()
                .filter(|m| m.role == Role::Assistant && m.content == FALLBACK_REPLY)
                .count();
            assert_eq!(fallbacks, i + 1);
            assert!(!controller.surface().is_visible(Node::LoadingOverlay));
        }
    }

    #[test]
    fn test_loading_visible_while_pending() {
        let mut controller = controller(vec![]);
        controller.select_creator(1).unwrap();
        controller.surface_mut().set_value(Node::MessageInput, "hi");

        let pending = controller.begin_send().unwrap();
        assert!(controller.surface().is_visible(Node::LoadingOverlay));
        assert_eq!(controller.state().session().history().len(), 1);

        controller.complete_send(pending, reply("hello"));
        assert!(!controller.surface().is_visible(Node::LoadingOverlay));
    }

    #[test]
    fn test_stale_reply_dropped() {
        let mut controller = controller(vec![]);
        controller.select_creator(1).unwrap();
        controller.surface_mut().set_value(Node::MessageInput, "first session");
        let pending = controller.begin_send().unwrap();

        controller.select_creator(2).unwrap();
        let outcome = controller.complete_send(pending, reply("late answer"));

        assert_eq!(outcome, SendOutcome::Discarded);
        assert!(controller.state().session().history().is_empty());
        assert!(!controller.surface().is_visible(Node::LoadingOverlay));
        assert_eq!(
            controller.surface().children(Node::ChatMessages),
            &[Child::Node(Node::WelcomeMessage)]
        );
    }

    #[test]
    fn test_creator_select_reentry_rerenders_grid() {
        let mut controller = controller(vec![]);
        controller.select_creator(1).unwrap();

        controller.navigate(Page::CreatorSelect);
        controller.navigate(Page::CreatorSelect);
        assert_eq!(visible_pages(&controller), vec![Node::CreatorPage]);
        assert_eq!(controller.surface().fragments(Node::CreatorsGrid).len(), 5);
        // Session survives navigation
        assert_eq!(controller.state().session().creator().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_debug_info() {
        let mut controller = ViewController::new(
            MemorySurface::without([Node::LoadingOverlay]),
            ScriptedTransport::default(),
            Catalog::builtin(),
        );
        controller.init();
        controller.select_role(UserRole::User);
        controller.select_creator(5).unwrap();

        let info = controller.debug_info();
        assert_eq!(info.page, Page::Chat);
        assert_eq!(info.role, Some(UserRole::User));
        assert_eq!(info.history_len, 0);
        assert_eq!(info.missing_regions, vec![Node::LoadingOverlay]);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["page"], "chat");
        assert_eq!(json["creator"]["name"], "Lewis George Hilsenteger");
    }
}
