//! Error types for the session layer.

use bidquiz_protocol::PlayerId;

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given connection. Either it was never
    /// opened or it has already been closed.
    #[error("session not found for {0}")]
    NotFound(PlayerId),

    /// A session is already open for this connection identity.
    #[error("{0} already has an open session")]
    AlreadyConnected(PlayerId),
}
