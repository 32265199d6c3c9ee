//! Reconnection decisions.
//!
//! Pure functions so the retry policy can be tested without a server.

use crate::error::ClientError;

/// The server refused this client for good: retrying cannot help.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::DuplicateClientId(_) | ClientError::RoomNotFound(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// `current_attempt` is 0-indexed.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}
