//! Lobby endpoint selection.
//!
//! Maps the page's `host` (hostname plus optional port) to the WebSocket URL of
//! the lobby server through a closed table. Unknown hosts are a configuration
//! error; there is no fallback endpoint.

use std::fmt;

use crate::config::ConfigError;

pub const PRODUCTION_HOST: &str = "fkbad.github.io";
pub const PRODUCTION_ENDPOINT: &str = "wss://sylv-connect4-ba23863cf42a.herokuapp.com/";

pub const LOCAL_HOST: &str = "localhost:8000";
pub const LOCAL_ENDPOINT: &str = "ws://localhost:8001/";

/// WebSocket URL of a lobby server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Validate a `ws://` or `wss://` URL.
    pub fn parse(endpoint: &str) -> Result<Self, ConfigError> {
        let url = url::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "ws" | "wss" => Ok(Self(endpoint.to_string())),
            other => Err(ConfigError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme `{other}`"),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_secure(&self) -> bool {
        self.0.starts_with("wss://")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed host → endpoint table.
#[derive(Debug, Clone)]
pub struct EndpointTable {
    entries: Vec<(String, Endpoint)>,
}

impl Default for EndpointTable {
    /// The deployed table: GitHub Pages → Heroku, local dev server → local lobby.
    fn default() -> Self {
        Self {
            entries: vec![
                (
                    PRODUCTION_HOST.to_string(),
                    Endpoint(PRODUCTION_ENDPOINT.to_string()),
                ),
                (LOCAL_HOST.to_string(), Endpoint(LOCAL_ENDPOINT.to_string())),
            ],
        }
    }
}

impl EndpointTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add (or replace) the endpoint for `host`.
    pub fn with_entry(mut self, host: &str, endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Endpoint::parse(endpoint)?;
        self.entries.retain(|(known, _)| known != host);
        self.entries.push((host.to_string(), endpoint));
        Ok(self)
    }

    /// Resolve the endpoint for a page host.
    ///
    /// Matching is exact: `localhost:8000` and `localhost` are different hosts.
    pub fn resolve(&self, host: &str) -> Result<Endpoint, ConfigError> {
        self.entries
            .iter()
            .find(|(known, _)| known == host)
            .map(|(_, endpoint)| endpoint.clone())
            .ok_or_else(|| ConfigError::UnsupportedHost {
                host: host.to_string(),
            })
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(host, _)| host.as_str())
    }
}
