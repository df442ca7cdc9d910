//! The page location the client was loaded from.
//!
//! Parsed once from the full page URL (`window.location.href` in the browser,
//! configuration on desktop) into the same fields the browser's `Location`
//! exposes.

use url::Url;

use crate::application::request_builder::QueryIntent;
use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    host: String,
    hostname: String,
    port: String,
    query: Option<String>,
}

impl PageLocation {
    pub fn parse(href: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(href).map_err(|source| ConfigError::InvalidPageUrl {
            url: href.to_string(),
            source,
        })?;

        let hostname = url.host_str().unwrap_or_default().to_string();
        // `Url::port` is `None` for the scheme's default port, like `Location.port`
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        let host = if port.is_empty() {
            hostname.clone()
        } else {
            format!("{hostname}:{port}")
        };

        Ok(Self {
            host,
            hostname,
            port,
            query: url.query().map(str::to_string),
        })
    }

    /// `hostname[:port]`, the key of the endpoint table
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Empty when the URL uses the scheme's default port
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn query_intent(&self) -> QueryIntent {
        QueryIntent::from_query(self.query().unwrap_or_default())
    }
}
