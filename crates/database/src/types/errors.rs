//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Invite-specific database errors
///
/// `NoSuchInvite` and `AlreadyAccepted` are distinct so callers can tell
/// a bad token apart from a link that was already used.
#[derive(Debug, Error)]
pub enum InviteError {
    #[error("No invite found for token {token}")]
    NoSuchInvite { token: String },

    #[error("Invite {token} has already been accepted")]
    AlreadyAccepted { token: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Action-recording errors
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Referenced record not found: {0}")]
    MissingReference(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
