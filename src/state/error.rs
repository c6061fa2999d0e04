//! Validation error types
//!
//! Rejected user actions. All of these are handled locally by the view
//! controller and never end the session.

use crate::catalog::CreatorId;
use thiserror::Error;

/// Errors raised when a user action cannot be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Page name does not match any page
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Creator id does not exist in the catalog
    #[error("Creator not found: {0}")]
    UnknownCreator(CreatorId),

    /// Message was empty after trimming
    #[error("Message is empty")]
    EmptyMessage,

    /// A message was sent before any creator was selected
    #[error("No creator selected for this session")]
    NoActiveCreator,
}

/// Result type for state transitions
pub type ValidationResult<T> = Result<T, ValidationError>;
