//! Per-connection handler.
//!
//! Each accepted connection gets its own Tokio task running this handler:
//!   1. Open a session and register an outbound queue
//!   2. Spawn a writer that drains the queue onto the socket
//!   3. Loop: receive frames → decode → dispatch → queue deliveries
//!   4. On close, run disconnect cleanup for the connection

use std::sync::Arc;

use bidquiz_protocol::{ClientEvent, Codec, PlayerId, ServerEvent};
use bidquiz_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::BidquizError;

/// Drop guard that runs disconnect cleanup when the handler exits.
///
/// This ensures cleanup happens even if the handler panics. Since `Drop`
/// is synchronous, we spawn a fire-and-forget task for the async lock.
struct DisconnectGuard<C: Codec> {
    player_id: PlayerId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for DisconnectGuard<C> {
    fn drop(&mut self) {
        let player_id = self.player_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut hub = state.hub.lock().await;
            let deliveries = hub.unregister(player_id);
            hub.deliver(deliveries);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), BidquizError> {
    let conn = Arc::new(conn);
    let player_id = PlayerId::from(conn.id());
    let (tx, rx) = mpsc::unbounded_channel();

    // Register and arm the guard back to back: if registration fails there
    // is nothing to clean up.
    state.hub.lock().await.register(player_id, tx)?;
    let _guard = DisconnectGuard {
        player_id,
        state: Arc::clone(&state),
    };
    tracing::info!(%player_id, "connected");

    let writer = tokio::spawn(write_loop(
        Arc::clone(&conn),
        Arc::clone(&state),
        player_id,
        rx,
    ));

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "undecodable frame dropped");
                continue;
            }
        };
        tracing::trace!(%player_id, ?event, "event received");

        let mut hub = state.hub.lock().await;
        let deliveries = hub.dispatcher.handle(player_id, event);
        hub.deliver(deliveries);
    }

    writer.abort();
    if let Err(e) = conn.close().await {
        tracing::trace!(%player_id, error = %e, "close after disconnect");
    }
    // _guard drops here → disconnect cleanup fires.
    Ok(())
}

/// Encodes queued events and writes them to the socket in order.
///
/// Ends when the queue's sender is dropped or the socket stops accepting
/// writes.
async fn write_loop<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    player_id: PlayerId,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = rx.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%player_id, error = %e, "failed to encode event");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%player_id, error = %e, "send failed, writer stopping");
            break;
        }
    }
}
