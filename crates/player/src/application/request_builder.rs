//! LobbyRequest builder for the bootstrap request
//!
//! Centralizes the decision of which lobby operation a page performs. The
//! lobby-listing page always asks for `list-games`; direct-game pages read the
//! `join` / `spectate` query parameters and create, join or spectate a match.

use vimera_shared::{ClientIdentity, LobbyRequest, P1WINS};

use crate::ports::outbound::LobbyTransport;

/// Query parameter naming a match to join.
pub const JOIN_PARAM: &str = "join";
/// Query parameter naming a match to spectate.
pub const SPECTATE_PARAM: &str = "spectate";

/// What the page URL asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// Neither `join` nor `spectate` present
    Create,
    Join { match_id: String },
    Spectate { match_id: String },
    /// Both present; the caller's intent cannot be decided
    Ambiguous { join: String, spectate: String },
}

impl QueryIntent {
    /// Interpret a raw query string (with or without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Interpret decoded key/value pairs.
    ///
    /// Mirrors `URLSearchParams.get`: the first occurrence of a key wins, and
    /// an empty value counts as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut join: Option<String> = None;
        let mut spectate: Option<String> = None;

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                JOIN_PARAM => &mut join,
                SPECTATE_PARAM => &mut spectate,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }

        let join = join.filter(|v| !v.is_empty());
        let spectate = spectate.filter(|v| !v.is_empty());

        match (join, spectate) {
            (Some(join), Some(spectate)) => QueryIntent::Ambiguous { join, spectate },
            (Some(match_id), None) => QueryIntent::Join { match_id },
            (None, Some(match_id)) => QueryIntent::Spectate { match_id },
            (None, None) => QueryIntent::Create,
        }
    }
}

/// Placeholder player names and game tag used by direct-game pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDefaults {
    /// Game tag sent with `create-match`
    pub game: String,
    /// `player-name` of the player creating a match
    pub creator_name: String,
    /// `player-name` of a player joining or spectating a match
    pub joiner_name: String,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        Self {
            game: P1WINS.to_string(),
            creator_name: "player1".to_string(),
            joiner_name: "player2".to_string(),
        }
    }
}

/// Request-construction policy, picked once per page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStrategy {
    /// Lobby-listing page
    ListGames,
    /// Direct-game page, driven by the query string
    LobbyIntent(MatchDefaults),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("found both join ({join}) and spectate ({spectate}) match ids in URL")]
    AmbiguousIntent { join: String, spectate: String },

    #[error("failed to serialize lobby request: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to send lobby request: {0}")]
    Send(#[source] anyhow::Error),
}

/// Builder for the bootstrap `LobbyRequest`
///
/// The only code path that writes to the lobby connection.
pub struct LobbyRequestBuilder;

impl LobbyRequestBuilder {
    /// Decide the request for `strategy` and `intent`.
    ///
    /// `ListGames` ignores the intent. For `LobbyIntent`, precedence is:
    /// ambiguous (error) > join > spectate > create.
    pub fn build(
        strategy: &BootstrapStrategy,
        intent: &QueryIntent,
        id: ClientIdentity,
    ) -> Result<LobbyRequest, RequestError> {
        let defaults = match strategy {
            BootstrapStrategy::ListGames => return Ok(LobbyRequest::list_games(id)),
            BootstrapStrategy::LobbyIntent(defaults) => defaults,
        };

        match intent {
            QueryIntent::Ambiguous { join, spectate } => Err(RequestError::AmbiguousIntent {
                join: join.clone(),
                spectate: spectate.clone(),
            }),
            QueryIntent::Join { match_id } => {
                tracing::debug!(match_id = %match_id, "Found join match id in URL");
                Ok(LobbyRequest::join_match(id, match_id, &defaults.joiner_name))
            }
            QueryIntent::Spectate { match_id } => {
                tracing::debug!(match_id = %match_id, "Found spectate match id in URL");
                Ok(LobbyRequest::spectate_match(id, match_id, &defaults.joiner_name))
            }
            QueryIntent::Create => Ok(LobbyRequest::create_match(
                id,
                &defaults.game,
                &defaults.creator_name,
            )),
        }
    }

    /// Serialize `request` and write it to the connection.
    pub fn send(
        transport: &dyn LobbyTransport,
        request: &LobbyRequest,
    ) -> Result<(), RequestError> {
        let json = request.to_json()?;
        tracing::info!(
            operation = %request.operation(),
            id = %request.id(),
            "sending >>> {}",
            json
        );
        transport.send_text(&json).map_err(RequestError::Send)
    }
}
