//! Lobby Transport Port - the write side of the lobby connection
//!
//! The bootstrap writes exactly one text frame per connection through this
//! trait. Desktop and WASM clients each provide an implementation over their
//! own socket type.

/// Port for writing text frames to an open lobby connection
///
/// Not `Send`: in the browser the socket lives on the page's event loop.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait LobbyTransport {
    /// Write one text frame
    fn send_text(&self, text: &str) -> anyhow::Result<()>;
}
