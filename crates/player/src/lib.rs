//! Vimera Player - lobby client.
//!
//! Resolves the lobby endpoint for the current deployment, opens one WebSocket
//! connection, sends a single bootstrap request describing the page's intent
//! (list games, create, join or spectate a match) and hands every inbound frame
//! to a handler table.
//!
//! Multi-platform support is provided via compile-time `cfg` selection:
//! tokio-tungstenite on desktop, web-sys in the browser.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;

// Re-export commonly used entrypoints
pub use application::request_builder::{
    BootstrapStrategy, LobbyRequestBuilder, MatchDefaults, QueryIntent, RequestError,
};
pub use config::ConfigError;
pub use infrastructure::endpoint::{Endpoint, EndpointTable};
pub use infrastructure::identity::IdentityGenerator;
pub use infrastructure::page::PageLocation;
pub use infrastructure::websocket::{
    logging_handlers, BootstrapOutcome, BootstrapState, ConnectionBootstrap, HandlerTable,
    ListenOutcome, LobbyClient, MessageListener,
};
