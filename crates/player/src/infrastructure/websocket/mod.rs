//! WebSocket client for the lobby connection
//!
//! Platform-specific implementations are in submodules:
//! - `desktop`: tokio-tungstenite based client
//! - `wasm`: web-sys WebSocket based client
//! - `bootstrap` / `listener`: shared open → request → dispatch logic

mod bootstrap;
mod listener;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

// Re-export shared types
pub use bootstrap::{BootstrapOutcome, BootstrapState, ConnectionBootstrap};
pub use listener::{
    logging_handlers, DecodeError, HandlerTable, ListenOutcome, MessageHandler, MessageListener,
};

// Re-export platform-specific types with unified names
#[cfg(not(target_arch = "wasm32"))]
pub use desktop::LobbyClient;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start_game, start_lobby, LobbyClient};
