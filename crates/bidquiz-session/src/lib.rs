//! Per-connection session context for bidquiz.
//!
//! Every accepted connection gets a [`Session`]. When a player joins a
//! room, the room code and display name are stashed on the session so
//! later `player:bid` and `player:answer` events, which carry no code,
//! can be routed to the right room.
//!
//! ```text
//! Dispatcher (above)  ← looks up the caller's session per event
//!     ↕
//! Session Layer (this crate)
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId, RoomCode
//! ```
//!
//! There is no authentication and no resumption: a session lives exactly
//! as long as its connection.

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::Session;
