//! Players and the join-ordered roster that holds them.

use bidquiz_protocol::{PlayerId, PlayerView, RosterEntry};
use indexmap::IndexMap;

/// Shown to the host in place of a missing or empty answer.
pub const NO_ANSWER: &str = "(no answer)";

/// One player's standing in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub money: u64,
    pub bid: u64,
    pub answer: Option<String>,
    /// `None` until the host judges this round.
    pub correct: Option<bool>,
}

impl Player {
    pub fn new(id: PlayerId, name: String, money: u64) -> Self {
        Self {
            id,
            name,
            money,
            bid: 0,
            answer: None,
            correct: None,
        }
    }

    /// Clears everything that belongs to a single round.
    pub fn reset_round(&mut self) {
        self.bid = 0;
        self.answer = None;
        self.correct = None;
    }

    /// The answer as the host sees it on the judging sheet.
    pub fn answer_or_placeholder(&self) -> &str {
        match self.answer.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => NO_ANSWER,
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            money: self.money,
            bid: self.bid,
            answer: self.answer.clone(),
            correct: self.correct,
        }
    }

    pub fn entry(&self) -> RosterEntry {
        RosterEntry {
            id: self.id,
            name: self.name.clone(),
            money: self.money,
        }
    }
}

/// Players keyed by identity, iterated in join order.
///
/// Removing a player keeps everyone else's relative order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: IndexMap<PlayerId, Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player at the end, or replaces the record in place if the
    /// identity is already present.
    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn remove(&mut self, id: &PlayerId) -> Option<Player> {
        self.players.shift_remove(id)
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Exact, case-sensitive name match against current members.
    pub fn name_taken(&self, name: &str) -> bool {
        self.players.values().any(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
