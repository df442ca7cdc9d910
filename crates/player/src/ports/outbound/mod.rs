//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the bootstrap logic to run without depending on a concrete socket.

pub mod transport;

pub use transport::LobbyTransport;

#[cfg(any(test, feature = "testing"))]
pub use transport::MockLobbyTransport;
