//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("could not determine the role of chat \"{0}\"")]
    AmbiguousRole(String),

    #[error("cannot change chat role to \"{requested}\" since it was started as \"{established}\"")]
    RoleConflict {
        requested: String,
        established: String,
    },

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("\"{0}\" is a reserved chat id")]
    ReservedId(String),
}

impl DomainError {
    /// Check if this error is a role mismatch on session resume
    pub fn is_role_conflict(&self) -> bool {
        matches!(self, DomainError::RoleConflict { .. })
    }
}
