//! Game settings and the room phase enum.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Settings shared by every room a registry creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Money every player starts with.
    pub starting_money: u64,

    /// Number of characters in a generated room code.
    pub code_length: usize,
}

impl GameConfig {
    /// Checks the settings a registry cannot work with.
    ///
    /// # Errors
    /// [`ConfigError::ZeroCodeLength`] if `code_length` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::ZeroCodeLength);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 1000,
            code_length: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a room is in its round lifecycle.
///
/// ```text
///   Lobby ──start──→ Bidding ──lock bids──→ Answering ──end round──→ Review
///                     ↑   │                                          │
///                     │   └─ next ─┐                                 │
///                     └────────────┴──────────── next ───────────────┘
///
///   start / next with no questions left ──→ Finished
/// ```
///
/// The phase alone decides which inbound events a room accepts.
/// `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lobby,
    Bidding,
    Answering,
    Review,
    Finished,
}

impl Phase {
    /// Returns `true` if players may still join.
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if the host's "next question" command applies.
    pub fn can_advance(self) -> bool {
        matches!(self, Self::Bidding | Self::Review)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lobby => "lobby",
            Self::Bidding => "bidding",
            Self::Answering => "answering",
            Self::Review => "review",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}
