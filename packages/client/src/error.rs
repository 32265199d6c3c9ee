//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client ID is already in use in the room
    #[error("Client ID '{0}' is already connected")]
    DuplicateClientId(String),

    /// The room is not open on the server
    #[error("Room '{0}' doesn't exist")]
    RoomNotFound(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
