//! Room registry: creates, looks up, and tears down rooms by code.

use std::collections::HashMap;

use bidquiz_protocol::{PlayerId, Question, RoomCode};
use rand::Rng;

use crate::{GameConfig, Room};

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draws at one length before codes grow by a character.
const MAX_CODE_ATTEMPTS: usize = 64;

/// Every live room in the process, keyed by code.
///
/// Owned by whoever runs the server; tests build as many independent
/// registries as they like.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Room>,
    config: GameConfig,
}

impl RoomRegistry {
    pub fn new(config: GameConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Creates a room in the lobby phase and returns its code.
    pub fn create_room(
        &mut self,
        host: PlayerId,
        questions: Vec<Question>,
    ) -> RoomCode {
        self.create_room_with(&mut rand::rng(), host, questions)
    }

    /// Like [`create_room`](Self::create_room) with a caller-supplied RNG.
    ///
    /// A generated code that is already live is thrown away and drawn
    /// again, so two live rooms never share a code. After
    /// `MAX_CODE_ATTEMPTS` collisions the code grows by one character, so
    /// a crowded code space slows creation down but never stalls it. A
    /// configured length of 0 is treated as 1.
    pub fn create_room_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        host: PlayerId,
        questions: Vec<Question>,
    ) -> RoomCode {
        let mut len = self.config.code_length.max(1);
        let code = 'search: loop {
            for _ in 0..MAX_CODE_ATTEMPTS {
                let candidate = generate_code(rng, len);
                if !self.rooms.contains_key(&candidate) {
                    break 'search candidate;
                }
                tracing::debug!(code = %candidate, "room code collision, regenerating");
            }
            tracing::warn!(
                length = len,
                rooms = self.rooms.len(),
                "room codes crowded, lengthening"
            );
            len += 1;
        };

        let room = Room::new(
            code.clone(),
            host,
            questions,
            self.config.starting_money,
        );
        tracing::info!(
            %code,
            %host,
            questions = room.questions().len(),
            "room created"
        );
        self.rooms.insert(code.clone(), room);
        code
    }

    pub fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn get_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    /// Removes a room. Its code becomes free for reuse.
    pub fn delete_room(&mut self, code: &RoomCode) -> Option<Room> {
        let room = self.rooms.remove(code)?;
        tracing::info!(%code, "room destroyed");
        Some(room)
    }

    /// Codes of every live room `host` created.
    pub fn hosted_by(&self, host: PlayerId) -> Vec<RoomCode> {
        self.rooms
            .values()
            .filter(|room| room.is_host(host))
            .map(|room| room.code().clone())
            .collect()
    }

    /// Returns the number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn generate_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> RoomCode {
    let code: String = (0..len)
        .map(|_| {
            let i = rng.random_range(0..CODE_ALPHABET.len());
            char::from(CODE_ALPHABET[i])
        })
        .collect();
    RoomCode::new(&code)
}
