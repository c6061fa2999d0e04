//! Creator persona records
//!
//! A `Creator` is the persona a user chats with. Records are built once at
//! startup and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a creator, unique within a catalog
pub type CreatorId = u32;

/// A persona profile the user can chat with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    /// Unique identifier
    pub id: CreatorId,
    /// Display name (e.g. "Marques Brownlee")
    pub name: String,
    /// Specialty or channel handle shown under the name
    pub specialty: String,
    /// Image reference for the avatar, passed through to the surface
    pub avatar: String,
    /// Free-text description used in search and in the system prompt
    #[serde(default)]
    pub description: String,
}

impl Creator {
    /// Create a new creator record with an empty description
    pub fn new(
        id: CreatorId,
        name: impl Into<String>,
        specialty: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            specialty: specialty.into(),
            avatar: avatar.into(),
            description: String::new(),
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Initials of the display name, used as the assistant avatar label
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }

    /// Whether `needle` (already lowercased) occurs in name, specialty or description
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.specialty.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl std::fmt::Display for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.specialty)
    }
}
