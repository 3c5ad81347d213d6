//! Identity and routing types shared by every layer.

use std::fmt;

use bidquiz_transport::ConnectionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identity of a participant (host or player).
///
/// A player's identity is the identity of the connection that joined, so
/// a device that drops and comes back is a different player. Serialized as
/// a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

impl From<ConnectionId> for PlayerId {
    fn from(id: ConnectionId) -> Self {
        Self(id.into_inner())
    }
}

/// Short human-typeable room identifier.
///
/// Always stored trimmed and uppercased, so `" ab12c"` typed on a phone
/// finds room `AB12C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Normalizes and wraps a raw code.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomCode {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who an outbound event is addressed to.
///
/// Room operations return `(Recipient, ServerEvent)` pairs; the dispatcher
/// resolves `Room` against the room's current members at send time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The host and every player currently in the room.
    Room,

    /// One participant.
    Player(PlayerId),
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// One question as supplied by the host.
///
/// Only `text` is read by the server. Anything else the host attaches
/// (an expected answer, a category) is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: serde_json::Map::new(),
        }
    }
}
