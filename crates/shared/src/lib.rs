//! Vimera Protocol - shared types for the lobby WebSocket protocol
//!
//! This crate contains the types exchanged between a lobby client and the
//! lobby server:
//! - Outbound requests (`LobbyRequest`, `Operation`, `OperationParams`)
//! - Inbound messages (`LobbyMessage`) and their typed view (`ServerMessage`)
//! - The server's numeric error codes (`ErrorCode`)
//! - The catalogue of game tags the server knows about
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets

pub mod error_codes;
pub mod games;
pub mod messages;

pub use error_codes::ErrorCode;
pub use games::{game_description, GAME_CATALOGUE, P1WINS};
pub use messages::{
    ClientIdentity, LobbyMessage, LobbyRequest, Operation, OperationParams, ServerError,
    ServerMessage,
};
