//! The per-connection context record.

use bidquiz_protocol::{PlayerId, RoomCode};

/// What the server remembers about one open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The connection's identity. Also its player identity in any room it
    /// joins.
    pub player_id: PlayerId,

    /// Room this connection last joined as a player.
    pub room: Option<RoomCode>,

    /// Display name chosen at that join.
    pub name: Option<String>,
}

impl Session {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            room: None,
            name: None,
        }
    }

    /// Records a successful join. A later join replaces the association.
    pub fn attach(&mut self, room: RoomCode, name: String) {
        self.room = Some(room);
        self.name = Some(name);
    }
}
