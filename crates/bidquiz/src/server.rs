//! `BidquizServer` builder and accept loop.
//!
//! This is the entry point for running a bidquiz server. It ties together
//! all the layers: transport → protocol → session → room.

use std::collections::HashMap;
use std::sync::Arc;

use bidquiz_protocol::{Codec, JsonCodec, PlayerId, ServerEvent};
use bidquiz_room::GameConfig;
use bidquiz_transport::{Transport, WebSocketTransport};
use tokio::sync::{Mutex, mpsc};

use crate::config::ServerConfig;
use crate::dispatch::{Delivery, Dispatcher};
use crate::handler::handle_connection;
use crate::BidquizError;

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) hub: Mutex<Hub>,
    pub(crate) codec: C,
}

/// Game state plus the outbound queue of every live connection.
///
/// Both sit behind the same lock so frames produced by one event are
/// queued before the next event is handled.
pub(crate) struct Hub {
    pub(crate) dispatcher: Dispatcher,
    outbound: HashMap<PlayerId, mpsc::UnboundedSender<ServerEvent>>,
}

impl Hub {
    pub(crate) fn new(config: GameConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
            outbound: HashMap::new(),
        }
    }

    /// Opens a session and starts routing frames to `tx`.
    pub(crate) fn register(
        &mut self,
        player_id: PlayerId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<(), BidquizError> {
        self.dispatcher.connect(player_id)?;
        self.outbound.insert(player_id, tx);
        Ok(())
    }

    /// Stops routing to `player_id` and runs disconnect cleanup.
    pub(crate) fn unregister(&mut self, player_id: PlayerId) -> Vec<Delivery> {
        self.outbound.remove(&player_id);
        self.dispatcher.disconnect(player_id)
    }

    /// Queues each frame on its recipient's connection. Frames for
    /// connections that are already gone are dropped.
    pub(crate) fn deliver(&self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            match self.outbound.get(&to) {
                Some(tx) => {
                    if tx.send(event).is_err() {
                        tracing::debug!(player_id = %to, "writer gone, frame dropped");
                    }
                }
                None => {
                    tracing::debug!(player_id = %to, "no live connection, frame dropped");
                }
            }
        }
    }
}

/// Builder for configuring and starting a bidquiz server.
///
/// # Example
///
/// ```rust,ignore
/// use bidquiz::prelude::*;
///
/// let server = BidquizServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct BidquizServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
}

impl BidquizServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            game_config: GameConfig::default(),
        }
    }

    /// Starts from a loaded [`ServerConfig`].
    pub fn from_config(config: ServerConfig) -> Self {
        Self {
            bind_addr: config.bind_addr,
            game_config: config.game,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the rules every new room is created with.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Validates the game settings, then binds the listener.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<BidquizServer<JsonCodec>, BidquizError> {
        self.game_config
            .validate()
            .map_err(|e| BidquizError::Config(e.to_string()))?;
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            hub: Mutex::new(Hub::new(self.game_config)),
            codec: JsonCodec,
        });

        Ok(BidquizServer { transport, state })
    }
}

impl Default for BidquizServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound bidquiz server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct BidquizServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl BidquizServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> BidquizServerBuilder {
        BidquizServerBuilder::new()
    }
}

impl<C: Codec> BidquizServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop, spawning a handler task per connection.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), BidquizError> {
        match self.local_addr() {
            Ok(addr) => tracing::info!(%addr, "bidquiz server running"),
            Err(_) => tracing::info!("bidquiz server running"),
        }

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
