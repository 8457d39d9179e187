//! Recoverable chat command failures.

use thiserror::Error;

/// Broad class of a [`CommandError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name or room that must be unique already exists.
    Uniqueness,
    /// A room or membership that must exist is missing.
    NotFound,
    /// The connection is not in a state that allows the command.
    StatePrecondition,
}

/// Why a chat command was refused.
///
/// Every variant is reported to the caller only as the command's failure
/// event; the detail is kept for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Another live connection holds the display name.
    #[error("name {0:?} is already taken")]
    NameTaken(String),

    /// A room with this name already exists.
    #[error("room {0:?} already exists")]
    RoomExists(String),

    /// No room with this name exists.
    #[error("room {0:?} not found")]
    RoomNotFound(String),

    /// The connection has not joined any room.
    #[error("connection is not a member of any room")]
    NotAMember,

    /// The connection is already a member of a room.
    #[error("connection is already a member of room {0:?}")]
    AlreadyMember(String),

    /// The connection has not set a display name.
    #[error("connection has not set a name")]
    Unnamed,

    /// The room is configured as non-deletable.
    #[error("room {0:?} cannot be deleted")]
    ProtectedRoom(String),

    /// The connection is not attached to the hub (never connected or already gone).
    #[error("connection is not attached")]
    Detached,
}

impl CommandError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::NameTaken(_) | CommandError::RoomExists(_) => ErrorKind::Uniqueness,
            CommandError::RoomNotFound(_) | CommandError::NotAMember => ErrorKind::NotFound,
            CommandError::AlreadyMember(_)
            | CommandError::Unnamed
            | CommandError::ProtectedRoom(_)
            | CommandError::Detached => ErrorKind::StatePrecondition,
        }
    }
}
