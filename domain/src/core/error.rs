//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Server not found: {0}")]
    ServerNotFound(String),

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("No active server")]
    NoActiveServer,

    #[error("No active channel")]
    NoActiveChannel,

    #[error("User \"{0}\" not found")]
    UserNotFound(String),

    #[error("User \"{0}\" is already a member")]
    AlreadyMember(String),

    #[error("User \"{0}\" is not a member")]
    NotAMember(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("A server needs at least one channel")]
    NoChannels,
}

impl DomainError {
    /// Check if this error comes from a permission check
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, DomainError::PermissionDenied(_))
    }
}
