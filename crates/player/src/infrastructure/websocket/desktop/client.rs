//! Desktop WebSocket client using tokio-tungstenite

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::infrastructure::endpoint::Endpoint;
use crate::infrastructure::websocket::{ConnectionBootstrap, MessageListener};
use crate::ports::outbound::LobbyTransport;

/// WebSocket client for one lobby session (Desktop)
///
/// Runs on the caller's task: connect, send the bootstrap request, then feed
/// every inbound frame to the listener until the server closes the connection.
pub struct LobbyClient {
    endpoint: Endpoint,
    bootstrap: ConnectionBootstrap,
    listener: MessageListener,
}

/// Queues outbound frames until the client flushes them to the socket.
struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl LobbyTransport for ChannelTransport {
    fn send_text(&self, text: &str) -> Result<()> {
        self.tx
            .send(text.to_string())
            .map_err(|e| anyhow::anyhow!("Lobby transport closed: {}", e))
    }
}

impl LobbyClient {
    pub fn new(
        endpoint: Endpoint,
        bootstrap: ConnectionBootstrap,
        listener: MessageListener,
    ) -> Self {
        Self {
            endpoint,
            bootstrap,
            listener,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Run the session to completion.
    ///
    /// Returns an error only if the connection cannot be established or the
    /// bootstrap request cannot be written. No reconnection is attempted.
    pub async fn run(mut self) -> Result<()> {
        let (ws_stream, _) = connect_async(self.endpoint.as_str())
            .await
            .with_context(|| format!("Failed to connect to lobby at {}", self.endpoint))?;
        tracing::info!("Connected to lobby at {}", self.endpoint);

        let (mut write, mut read) = ws_stream.split();

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let transport = ChannelTransport { tx };

        match self.bootstrap.on_open(&transport) {
            Ok(outcome) => tracing::debug!(?outcome, "Bootstrap complete"),
            Err(e) => tracing::error!("Bootstrap request failed: {}", e),
        }

        // Flush before reading so the request precedes any inbound processing
        while let Ok(json) = rx.try_recv() {
            write
                .send(Message::Text(json))
                .await
                .context("Failed to send bootstrap request")?;
        }

        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    self.listener.on_text(&text);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }
}
