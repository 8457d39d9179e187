//! Error types for roomhub.

use thiserror::Error;

/// Common error type for roomhub.
///
/// Chat commands have their own recoverable error type
/// ([`CommandError`](crate::chat::CommandError)); this one covers the
/// process around them: configuration, I/O and the transport binding.
#[derive(Error, Debug)]
pub enum RoomHubError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for input crossing the transport boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport error (connection attachment, socket handling).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type alias for roomhub operations.
pub type Result<T> = std::result::Result<T, RoomHubError>;
