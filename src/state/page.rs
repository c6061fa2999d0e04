//! Page navigation
//!
//! Three mutually exclusive pages and the transitions between them:
//!
//! ```text
//! home ──selectRole(user)──▶ creatorSelect ──selectCreator(id)──▶ chat
//!  ▲ │                            ▲
//!  └─┘ selectRole(creator)        └── re-entry from any page
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ValidationError;

/// A top-level page; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Home,
    CreatorSelect,
    Chat,
}

impl Page {
    /// All pages, in navigation order
    pub fn all() -> &'static [Page] {
        &[Page::Home, Page::CreatorSelect, Page::Chat]
    }

    /// Canonical name accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::CreatorSelect => "creator",
            Page::Chat => "chat",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Page::Home),
            "creator" | "creatorSelect" => Ok(Page::CreatorSelect),
            "chat" => Ok(Page::Chat),
            other => Err(ValidationError::UnknownPage(other.to_string())),
        }
    }
}

/// How the visitor wants to use the app, chosen on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Chat with a creator persona
    User,
    /// Creator tooling (not available yet)
    Creator,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "creator" => Ok(UserRole::Creator),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Result of choosing a role on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleOutcome {
    /// Navigation happened
    Navigated(Page),
    /// Role is not available; the page stays as it was
    ComingSoon,
}

/// Tracks the active page
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    pub fn new() -> Self {
        Self { current: Page::Home }
    }

    /// Currently active page
    pub fn current(&self) -> Page {
        self.current
    }

    /// Activate `page`, returning the previously active one
    pub fn go(&mut self, page: Page) -> Page {
        std::mem::replace(&mut self.current, page)
    }

    /// Apply a role choice
    pub fn select_role(&mut self, role: UserRole) -> RoleOutcome {
        match role {
            UserRole::User => {
                self.go(Page::CreatorSelect);
                RoleOutcome::Navigated(Page::CreatorSelect)
            }
            UserRole::Creator => RoleOutcome::ComingSoon,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_round_trip() {
        for page in Page::all() {
            assert_eq!(page.as_str().parse::<Page>(), Ok(*page));
        }
        assert_eq!("creatorSelect".parse::<Page>(), Ok(Page::CreatorSelect));
    }

    #[test]
    fn test_unknown_page_rejected() {
        assert_eq!(
            "settings".parse::<Page>(),
            Err(ValidationError::UnknownPage("settings".to_string()))
        );
    }

    #[test]
    fn test_user_role_navigates() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select_role(UserRole::User), RoleOutcome::Navigated(Page::CreatorSelect));
        assert_eq!(nav.current(), Page::CreatorSelect);
    }

    #[test]
    fn test_creator_role_stays_home() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select_role(UserRole::Creator), RoleOutcome::ComingSoon);
        assert_eq!(nav.current(), Page::Home);
    }

    #[test]
    fn test_creator_select_reentry_is_idempotent() {
        let mut nav = Navigator::new();
        nav.go(Page::Chat);
        assert_eq!(nav.go(Page::CreatorSelect), Page::Chat);
        assert_eq!(nav.go(Page::CreatorSelect), Page::CreatorSelect);
        assert_eq!(nav.current(), Page::CreatorSelect);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("User".parse::<UserRole>(), Ok(UserRole::User));
        assert!("admin".parse::<UserRole>().is_err());
    }
}
