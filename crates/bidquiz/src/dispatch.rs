//! Routes decoded client events to rooms and fans the results out.
//!
//! The [`Dispatcher`] owns every room and every session. It is synchronous:
//! the connection handler locks it, hands it one event, and gets back the
//! exact list of frames to push to each connection. Holding the lock for
//! the whole call makes each event atomic with respect to every other.

use bidquiz_protocol::{
    ClientEvent, JoinRoom, PlayerId, Recipient, RoomCode, ServerEvent,
};
use bidquiz_room::{GameConfig, Outbox, Room, RoomError, RoomRegistry};
use bidquiz_session::{SessionError, SessionManager};

/// One frame addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: PlayerId,
    pub event: ServerEvent,
}

impl Delivery {
    pub fn new(to: PlayerId, event: ServerEvent) -> Self {
        Self { to, event }
    }
}

/// All room and session state for one server.
#[derive(Debug, Default)]
pub struct Dispatcher {
    rooms: RoomRegistry,
    sessions: SessionManager,
}

impl Dispatcher {
    pub fn new(config: GameConfig) -> Self {
        Self {
            rooms: RoomRegistry::new(config),
            sessions: SessionManager::new(),
        }
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Registers a freshly accepted connection.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyConnected`] if the identity is
    /// already in use.
    pub fn connect(&mut self, id: PlayerId) -> Result<(), SessionError> {
        self.sessions.open(id).map(|_| ())
    }

    /// Applies one client event and returns what to send, in order.
    pub fn handle(&mut self, from: PlayerId, event: ClientEvent) -> Vec<Delivery> {
        match event {
            ClientEvent::CreateRoom(create) => {
                let questions = create.questions.unwrap_or_default();
                let code = self.rooms.create_room(from, questions);
                vec![Delivery::new(from, ServerEvent::RoomCreated { code })]
            }
            ClientEvent::Join(join) => self.join(from, join),
            ClientEvent::Start(cmd) => {
                self.host_command(from, cmd.code, "host:start", Room::start)
            }
            ClientEvent::Next(cmd) => {
                self.host_command(from, cmd.code, "host:next", Room::next_question)
            }
            ClientEvent::LockBids(cmd) => {
                self.host_command(from, cmd.code, "host:lock_bids", Room::lock_bids)
            }
            ClientEvent::EndRound(cmd) => {
                self.host_command(from, cmd.code, "host:end_round", Room::end_round)
            }
            ClientEvent::Mark(mark) => {
                let Some(target) = mark.player_id else {
                    tracing::debug!(player_id = %from, "host:mark without a target, ignored");
                    return Vec::new();
                };
                let correct = mark.correct.unwrap_or(false);
                self.host_command(from, mark.code, "host:mark", |room, caller| {
                    room.mark(caller, target, correct)
                })
            }
            ClientEvent::Bid(bid) => {
                let amount = bid.amount();
                self.player_command(from, "player:bid", |room| room.bid(from, amount))
            }
            ClientEvent::Answer(answer) => {
                let text = answer.text();
                self.player_command(from, "player:answer", |room| {
                    Ok(room.answer(from, text))
                })
            }
        }
    }

    /// Cleans up after a closed connection.
    ///
    /// Every room the connection hosted is announced as over and deleted.
    /// If it had joined a room as a player, it leaves that room's roster.
    pub fn disconnect(&mut self, from: PlayerId) -> Vec<Delivery> {
        let session = match self.sessions.close(from) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(player_id = %from, error = %e, "disconnect without session");
                None
            }
        };

        let mut out = Vec::new();
        let notice = ServerEvent::Error {
            msg: RoomError::HostDisconnected.to_string(),
        };
        for code in self.rooms.hosted_by(from) {
            let Some(room) = self.rooms.delete_room(&code) else {
                continue;
            };
            tracing::info!(%code, host = %from, "host disconnected, room closed");
            out.extend(
                room.members()
                    .into_iter()
                    .filter(|&id| id != from)
                    .map(|id| Delivery::new(id, notice.clone())),
            );
        }

        if let Some(code) = session.and_then(|s| s.room) {
            if let Some(room) = self.rooms.get_mut(&code) {
                let outbox = room.remove_player(from);
                out.extend(route(room, outbox));
            }
        }
        out
    }

    // -- Internals --------------------------------------------------------

    fn join(&mut self, from: PlayerId, join: JoinRoom) -> Vec<Delivery> {
        let Some(code) = join.code else {
            return reject(from, RoomError::NotFound);
        };
        let Some(room) = self.rooms.get_mut(&code) else {
            tracing::debug!(player_id = %from, %code, "join for unknown room");
            return reject(from, RoomError::NotFound);
        };
        let name = join.name.unwrap_or_default();

        match room.join(from, name.clone()) {
            Ok(outbox) => {
                let deliveries = route(room, outbox);
                if let Err(e) = self.sessions.attach(from, code, name) {
                    tracing::debug!(player_id = %from, error = %e, "joined without a session");
                }
                deliveries
            }
            Err(e) => reject(from, e),
        }
    }

    fn host_command<F>(
        &mut self,
        from: PlayerId,
        code: Option<RoomCode>,
        event: &'static str,
        op: F,
    ) -> Vec<Delivery>
    where
        F: FnOnce(&mut Room, PlayerId) -> Outbox,
    {
        let room = match &code {
            Some(code) => self.rooms.get_mut(code),
            None => None,
        };
        let Some(room) = room else {
            tracing::debug!(player_id = %from, event, "no such room, ignored");
            return Vec::new();
        };
        let outbox = op(room, from);
        route(room, outbox)
    }

    fn player_command<F>(
        &mut self,
        from: PlayerId,
        event: &'static str,
        op: F,
    ) -> Vec<Delivery>
    where
        F: FnOnce(&mut Room) -> Result<Outbox, RoomError>,
    {
        let room = match self.sessions.room_of(&from) {
            Some(code) => self.rooms.get_mut(code),
            None => None,
        };
        let Some(room) = room else {
            tracing::debug!(player_id = %from, event, "not in a room, ignored");
            return Vec::new();
        };
        match op(room) {
            Ok(outbox) => route(room, outbox),
            Err(e) => reject(from, e),
        }
    }
}

/// Expands room-wide recipients to the room's current members.
fn route(room: &Room, outbox: Outbox) -> Vec<Delivery> {
    let mut out = Vec::with_capacity(outbox.len());
    for (recipient, event) in outbox {
        match recipient {
            Recipient::Player(id) => out.push(Delivery::new(id, event)),
            Recipient::Room => out.extend(
                room.members()
                    .into_iter()
                    .map(|id| Delivery::new(id, event.clone())),
            ),
        }
    }
    out
}

fn reject(to: PlayerId, error: RoomError) -> Vec<Delivery> {
    tracing::debug!(player_id = %to, error = %error, "rejected");
    vec![Delivery::new(
        to,
        ServerEvent::Error {
            msg: error.to_string(),
        },
    )]
}
