//! The session manager: one [`Session`] per open connection.
//!
//! `SessionManager` is not thread-safe by itself. It is owned by the
//! dispatcher and only touched while the dispatcher lock is held.

use std::collections::HashMap;

use bidquiz_protocol::{PlayerId, RoomCode};

use crate::{Session, SessionError};

/// Tracks every open connection's session.
///
/// ```text
/// open() ──→ attach() ──→ close()
///    │                       │
///    ▼                       ▼
/// [no room]            [session gone]
/// ```
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<PlayerId, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for a freshly accepted connection.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyConnected`] if the identity already
    /// has a session.
    pub fn open(&mut self, player_id: PlayerId) -> Result<&Session, SessionError> {
        if self.sessions.contains_key(&player_id) {
            return Err(SessionError::AlreadyConnected(player_id));
        }
        tracing::debug!(%player_id, "session opened");
        Ok(self
            .sessions
            .entry(player_id)
            .or_insert_with(|| Session::new(player_id)))
    }

    /// Associates a session with the room it joined and the name it used.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no session exists.
    pub fn attach(
        &mut self,
        player_id: PlayerId,
        room: RoomCode,
        name: String,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(&player_id)
            .ok_or(SessionError::NotFound(player_id))?;
        tracing::debug!(%player_id, code = %room, %name, "session attached to room");
        session.attach(room, name);
        Ok(())
    }

    /// The room a connection last joined, if any.
    pub fn room_of(&self, player_id: &PlayerId) -> Option<&RoomCode> {
        self.sessions.get(player_id)?.room.as_ref()
    }

    /// Closes a session and hands back its final state.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no session exists.
    pub fn close(&mut self, player_id: PlayerId) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .remove(&player_id)
            .ok_or(SessionError::NotFound(player_id))?;
        tracing::debug!(%player_id, "session closed");
        Ok(session)
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&Session> {
        self.sessions.get(player_id)
    }

    /// Returns the number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
