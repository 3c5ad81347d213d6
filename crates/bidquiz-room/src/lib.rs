//! Rooms for bidquiz: registry, round state machine, and bid resolution.
//!
//! Everything in this crate is synchronous and does no I/O. Callers feed
//! in one event at a time and deliver the returned [`Outbox`] themselves.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: creates rooms, hands out codes, tears rooms down
//! - [`Room`]: one game's phase, roster, rounds, and money bookkeeping
//! - [`resolve`]: money outcome of a single host judgment
//! - [`Roster`]: join-ordered players
//! - [`Phase`], [`GameConfig`], [`RoomError`], [`ConfigError`]

mod config;
mod error;
mod registry;
mod resolve;
mod room;
mod roster;

pub use config::{GameConfig, Phase};
pub use error::{ConfigError, RoomError};
pub use registry::RoomRegistry;
pub use resolve::{Judgment, resolve};
pub use room::{Outbox, Room};
pub use roster::{NO_ANSWER, Player, Roster};
