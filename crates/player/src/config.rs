//! Client configuration.
//!
//! In the browser everything comes from `window.location` and the page's entry
//! point. The desktop harness reads the same inputs from the environment.

use crate::application::request_builder::{BootstrapStrategy, MatchDefaults};
use crate::infrastructure::endpoint::EndpointTable;

/// Page URL emulated by the desktop harness when `VIMERA_PAGE_URL` is unset.
pub const DEFAULT_PAGE_URL: &str = "http://localhost:8000/";

/// Configuration failures. All of them are fatal and stop the bootstrap before
/// a connection is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported host: {host}")]
    UnsupportedHost { host: String },

    #[error("invalid page url `{url}`: {source}")]
    InvalidPageUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("unknown bootstrap mode `{0}` (expected `lobby` or `game`)")]
    InvalidStrategy(String),
}

/// Everything needed to start one client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub page_url: String,
    pub strategy: BootstrapStrategy,
    pub endpoints: EndpointTable,
}

impl ClientConfig {
    /// Read configuration from process environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Recognised keys: `VIMERA_PAGE_URL`, `VIMERA_BOOTSTRAP` (`lobby` | `game`),
    /// `VIMERA_GAME`, `VIMERA_CREATOR_NAME`, `VIMERA_JOINER_NAME`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let page_url = non_empty("VIMERA_PAGE_URL").unwrap_or_else(|| DEFAULT_PAGE_URL.into());

        let mode = non_empty("VIMERA_BOOTSTRAP").unwrap_or_else(|| "game".into());
        let strategy = match mode.to_ascii_lowercase().as_str() {
            "lobby" => BootstrapStrategy::ListGames,
            "game" => {
                let mut defaults = MatchDefaults::default();
                if let Some(game) = non_empty("VIMERA_GAME") {
                    if vimera_shared::game_description(&game).is_none() {
                        tracing::warn!(game = %game, "Game tag is not in the known catalogue");
                    }
                    defaults.game = game;
                }
                if let Some(name) = non_empty("VIMERA_CREATOR_NAME") {
                    defaults.creator_name = name;
                }
                if let Some(name) = non_empty("VIMERA_JOINER_NAME") {
                    defaults.joiner_name = name;
                }
                BootstrapStrategy::LobbyIntent(defaults)
            }
            _ => return Err(ConfigError::InvalidStrategy(mode)),
        };

        Ok(Self {
            page_url,
            strategy,
            endpoints: EndpointTable::default(),
        })
    }
}
