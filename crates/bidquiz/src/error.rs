//! Unified error type for the bidquiz server.

use bidquiz_session::SessionError;
use bidquiz_transport::TransportError;

/// Top-level error that wraps the sub-crate errors.
///
/// Room errors are not here: they are reported to the participant as an
/// `error` event and never abort a connection. Frames that fail to decode
/// or encode are logged and skipped in the handler, so protocol errors
/// never surface here either.
#[derive(Debug, thiserror::Error)]
pub enum BidquizError {
    /// A transport-level error (bind, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A session-level error.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A setting, from the environment or the builder, that the server
    /// cannot run with.
    #[error("invalid configuration: {0}")]
    Config(String),
}
