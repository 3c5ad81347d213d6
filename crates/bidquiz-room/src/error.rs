//! Error types for the room layer.

/// Problems reported back to the participant that caused them.
///
/// None of these change room state. The `Display` text is exactly what
/// the client shows, so keep it short and human.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No live room has the requested code.
    #[error("Room not found")]
    NotFound,

    /// The room has left the lobby; joins are closed.
    #[error("Game already started")]
    AlreadyStarted,

    /// Another current member already uses this exact name.
    #[error("Name already taken")]
    NameTaken,

    /// The bid was not a non-negative integer within the player's money.
    #[error("Invalid bid")]
    InvalidBid,

    /// The host's connection dropped; the room is gone.
    #[error("Host disconnected. Game over.")]
    HostDisconnected,
}

/// A [`GameConfig`](crate::GameConfig) that rooms cannot be created with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Room codes need at least one character.
    #[error("code_length must be at least 1")]
    ZeroCodeLength,
}
