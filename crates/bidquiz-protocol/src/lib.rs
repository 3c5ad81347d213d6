//! Wire protocol for bidquiz.
//!
//! - **Identities** ([`PlayerId`], [`RoomCode`]) and routing
//!   ([`Recipient`]).
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) and the view payloads
//!   they carry.
//! - **Codec** ([`Codec`], [`JsonCodec`]) for turning events into frames.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": {...}}`.
//! Inbound payloads are read permissively: any field may be missing or
//! null.

mod bid;
mod codec;
mod error;
mod events;
mod lenient;
mod types;

pub use bid::parse_bid;
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use events::{
    BidStatus, ClientEvent, CreateRoom, HostCommand, JoinRoom, MarkAnswer,
    PlayerView, ReviewEntry, RosterEntry, ServerEvent, Standing,
    SubmitAnswer, SubmitBid,
};
pub use types::{PlayerId, Question, Recipient, RoomCode};
