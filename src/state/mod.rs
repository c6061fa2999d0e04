//! Session and Navigation State
//!
//! The owned application state: active page, chosen role and the current
//! chat session. The view controller holds one [`AppState`] and is the only
//! writer.

mod error;
mod page;
mod session;

pub use error::{ValidationError, ValidationResult};
pub use page::{Navigator, Page, RoleOutcome, UserRole};
pub use session::{ChatMessage, Role, Session, SessionId};

use crate::catalog::Creator;

/// Application state owned by the view controller
#[derive(Debug, Clone, Default)]
pub struct AppState {
    navigator: Navigator,
    role: Option<UserRole>,
    session: Session,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active page
    pub fn page(&self) -> Page {
        self.navigator.current()
    }

    /// Role chosen on the home page, if any
    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Activate `page`, returning the previously active one
    pub fn show(&mut self, page: Page) -> Page {
        self.navigator.go(page)
    }

    /// Record a role choice and apply its transition
    pub fn select_role(&mut self, role: UserRole) -> RoleOutcome {
        self.role = Some(role);
        self.navigator.select_role(role)
    }

    /// Replace the session with a fresh one for `creator` and enter the chat page
    pub fn start_session(&mut self, creator: Creator) -> &Session {
        self.session = Session::start(creator);
        self.navigator.go(Page::Chat);
        &self.session
    }
}
