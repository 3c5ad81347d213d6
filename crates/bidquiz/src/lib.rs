//! # bidquiz
//!
//! Real-time server for a bidding trivia game played in one room.
//!
//! A host device creates a room and drives the rounds; players join with
//! a short room code, bid part of their money on each question, then
//! answer it. The host marks each answer and money moves by the bid.
//! Bidding nothing, or losing everything, knocks a player out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bidquiz::prelude::*;
//!
//! # async fn run() -> Result<(), BidquizError> {
//! let server = BidquizServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod dispatch;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use dispatch::{Delivery, Dispatcher};
pub use error::BidquizError;
pub use server::{BidquizServer, BidquizServerBuilder};

pub use bidquiz_protocol as protocol;
pub use bidquiz_room as room;

pub mod prelude {
    pub use crate::{
        BidquizError, BidquizServer, BidquizServerBuilder, Delivery,
        Dispatcher, ServerConfig,
    };
    pub use bidquiz_protocol::{ClientEvent, PlayerId, RoomCode, ServerEvent};
    pub use bidquiz_room::{GameConfig, Phase};
}
