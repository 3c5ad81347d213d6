//! Inbound and outbound events.
//!
//! Event names and payload field names match the browser clients
//! (`host:create`, `player:bid`, `questionIndex`, ...). Inbound payload
//! structs default every field, so a client that omits or nulls a field
//! still gets a well-formed event; deciding what an absent value means is
//! left to the room logic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{PlayerId, Question, RoomCode, lenient, parse_bid};

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// An event sent by a host or player device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "host:create")]
    CreateRoom(CreateRoom),

    #[serde(rename = "player:join")]
    Join(JoinRoom),

    #[serde(rename = "host:start")]
    Start(HostCommand),

    #[serde(rename = "host:next")]
    Next(HostCommand),

    #[serde(rename = "player:bid")]
    Bid(SubmitBid),

    #[serde(rename = "host:lock_bids")]
    LockBids(HostCommand),

    #[serde(rename = "player:answer")]
    Answer(SubmitAnswer),

    #[serde(rename = "host:end_round")]
    EndRound(HostCommand),

    #[serde(rename = "host:mark")]
    Mark(MarkAnswer),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRoom {
    #[serde(deserialize_with = "lenient::questions")]
    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinRoom {
    #[serde(deserialize_with = "lenient::room_code")]
    pub code: Option<RoomCode>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

/// Payload shared by the host commands that only name a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostCommand {
    #[serde(deserialize_with = "lenient::room_code")]
    pub code: Option<RoomCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitBid {
    pub bid: Option<Value>,
}

impl SubmitBid {
    /// The bid as a non-negative integer, if it parses as one.
    pub fn amount(&self) -> Option<u64> {
        self.bid.as_ref().and_then(parse_bid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitAnswer {
    pub answer: Option<Value>,
}

impl SubmitAnswer {
    /// The answer as text. Strings are kept verbatim; other JSON values
    /// are rendered as JSON; `null` means no answer.
    pub fn text(&self) -> Option<String> {
        self.answer.as_ref().and_then(lenient::value_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkAnswer {
    #[serde(deserialize_with = "lenient::room_code")]
    pub code: Option<RoomCode>,
    #[serde(deserialize_with = "lenient::player_id")]
    pub player_id: Option<PlayerId>,
    /// Read for truthiness, so `1` and `"yes"` both count as correct.
    #[serde(deserialize_with = "lenient::truthy")]
    pub correct: Option<bool>,
}

// ---------------------------------------------------------------------------
// Views carried by outbound events
// ---------------------------------------------------------------------------

/// Full player record, as shown in roster updates and final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub money: u64,
    pub bid: u64,
    pub answer: Option<String>,
    pub correct: Option<bool>,
}

/// Player summary sent at the start of a round. Bids are not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
    pub money: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidStatus {
    pub id: PlayerId,
    pub name: String,
    pub has_bid: bool,
    pub bid: u64,
}

/// One line of the host's judging sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub id: PlayerId,
    pub name: String,
    pub bid: u64,
    pub answer: String,
    pub correct: Option<bool>,
    pub money: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub money: u64,
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// An event sent by the server to one participant or a whole room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    #[serde(rename = "host:created")]
    RoomCreated { code: RoomCode },

    #[serde(rename = "player:joined")]
    Joined {
        name: String,
        money: u64,
        code: RoomCode,
    },

    #[serde(rename = "room:players")]
    Players { players: Vec<PlayerView> },

    #[serde(rename = "room:bids")]
    Bids { bids: Vec<BidStatus> },

    #[serde(rename = "player:bid_confirmed")]
    BidConfirmed { bid: u64 },

    #[serde(rename = "round:answer_phase")]
    AnswerPhase,

    #[serde(rename = "room:answers_progress")]
    AnswersProgress { answered: usize, total: usize },

    #[serde(rename = "round:all_answered")]
    AllAnswered,

    #[serde(rename = "player:answer_confirmed")]
    AnswerConfirmed,

    /// Host only: everything needed to judge the round.
    #[serde(rename = "host:review")]
    Review { answers: Vec<ReviewEntry> },

    /// Room-wide notice that judging has begun. Carries no answers.
    #[serde(rename = "round:review")]
    ReviewStarted,

    #[serde(rename = "round:start")]
    RoundStart {
        question_index: usize,
        total: usize,
        question: String,
        players: Vec<RosterEntry>,
    },

    #[serde(rename = "player:result")]
    Result {
        correct: bool,
        bid: u64,
        money: u64,
        eliminated: bool,
    },

    /// Host only: judging sheet after a mark, with live standings.
    #[serde(rename = "host:review_update")]
    ReviewUpdate {
        answers: Vec<ReviewEntry>,
        eliminated: Vec<String>,
        standings: Vec<Standing>,
    },

    #[serde(rename = "game:finished")]
    Finished {
        standings: Vec<PlayerView>,
        eliminated: Vec<String>,
    },

    #[serde(rename = "error")]
    Error { msg: String },
}
