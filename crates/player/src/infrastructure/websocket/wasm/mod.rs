//! WASM WebSocket implementation using web-sys

mod client;
mod entry;

pub use client::LobbyClient;
pub use entry::{start_game, start_lobby};
