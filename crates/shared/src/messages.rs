//! WebSocket message types for lobby client-server communication
//!
//! Outbound traffic is a single `LobbyRequest` per connection. Inbound traffic
//! is arbitrary JSON (`LobbyMessage`); the client only looks at its `type`
//! discriminator, and `ServerMessage` offers a typed view of the shapes the
//! lobby server is known to send.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_codes::ErrorCode;

// =============================================================================
// Client Messages (client → lobby)
// =============================================================================

/// Correlation token sent as the `id` of every request.
///
/// Not a credential and never persisted; see `vimera-player`'s identity module
/// for how it is generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lobby operations a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    ListGames,
    CreateMatch,
    JoinMatch,
    SpectateMatch,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListGames => "list-games",
            Operation::CreateMatch => "create-match",
            Operation::JoinMatch => "join-match",
            Operation::SpectateMatch => "spectate-match",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation-specific `params` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationParams {
    /// Params of `create-match`
    CreateMatch {
        game: String,
        #[serde(rename = "player-name")]
        player_name: String,
    },
    /// Params of `join-match` and `spectate-match`
    Match {
        #[serde(rename = "match-id")]
        match_id: String,
        #[serde(rename = "player-name")]
        player_name: String,
    },
}

impl OperationParams {
    pub fn player_name(&self) -> &str {
        match self {
            OperationParams::CreateMatch { player_name, .. }
            | OperationParams::Match { player_name, .. } => player_name,
        }
    }

    pub fn match_id(&self) -> Option<&str> {
        match self {
            OperationParams::Match { match_id, .. } => Some(match_id),
            OperationParams::CreateMatch { .. } => None,
        }
    }

    pub fn game(&self) -> Option<&str> {
        match self {
            OperationParams::CreateMatch { game, .. } => Some(game),
            OperationParams::Match { .. } => None,
        }
    }
}

/// A request from client to lobby: `{"type": "request", "operation", "id", "params"?}`
///
/// Fields are private; the constructors keep `operation` and `params` paired
/// the way the server expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "request")]
pub struct LobbyRequest {
    operation: Operation,
    id: ClientIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<OperationParams>,
}

impl LobbyRequest {
    /// `list-games` carries no `params` key.
    pub fn list_games(id: ClientIdentity) -> Self {
        Self {
            operation: Operation::ListGames,
            id,
            params: None,
        }
    }

    pub fn create_match(id: ClientIdentity, game: &str, player_name: &str) -> Self {
        Self {
            operation: Operation::CreateMatch,
            id,
            params: Some(OperationParams::CreateMatch {
                game: game.to_string(),
                player_name: player_name.to_string(),
            }),
        }
    }

    pub fn join_match(id: ClientIdentity, match_id: &str, player_name: &str) -> Self {
        Self::for_match(Operation::JoinMatch, id, match_id, player_name)
    }

    pub fn spectate_match(id: ClientIdentity, match_id: &str, player_name: &str) -> Self {
        Self::for_match(Operation::SpectateMatch, id, match_id, player_name)
    }

    fn for_match(
        operation: Operation,
        id: ClientIdentity,
        match_id: &str,
        player_name: &str,
    ) -> Self {
        Self {
            operation,
            id,
            params: Some(OperationParams::Match {
                match_id: match_id.to_string(),
                player_name: player_name.to_string(),
            }),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn id(&self) -> &ClientIdentity {
        &self.id
    }

    pub fn params(&self) -> Option<&OperationParams> {
        self.params.as_ref()
    }

    /// Serialize to the text frame written on the socket.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Server Messages (lobby → client)
// =============================================================================

/// Any inbound frame that decoded as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyMessage(Value);

impl LobbyMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    /// The `type` discriminator, if the message is an object carrying a string `type`.
    pub fn message_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Interpret the message against the shapes the lobby server sends.
    pub fn to_server_message(&self) -> ServerMessage {
        match self.message_type() {
            Some("response") => match RawResponse::deserialize(&self.0) {
                Ok(RawResponse {
                    id,
                    error: Some(error),
                    ..
                }) => ServerMessage::Error {
                    id,
                    error: ServerError {
                        code: ErrorCode::from(error.code),
                        message: error.message,
                        data: error.data,
                    },
                },
                Ok(RawResponse {
                    id,
                    result: Some(result),
                    ..
                }) => ServerMessage::Response { id, result },
                _ => ServerMessage::Other,
            },
            Some("notification") => match RawNotification::deserialize(&self.0) {
                Ok(n) => ServerMessage::Notification {
                    scope: n.scope,
                    event: n.event,
                    data: n.data,
                },
                Err(_) => ServerMessage::Other,
            },
            _ => ServerMessage::Other,
        }
    }
}

/// Typed view of an inbound `LobbyMessage`.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// Successful `response`; `result` content depends on the operation
    Response { id: Option<String>, result: Value },
    /// Failed `response`
    Error { id: Option<String>, error: ServerError },
    /// Match lifecycle `notification` (`scope` "match", `event` start/update/end)
    Notification {
        scope: String,
        event: String,
        data: Value,
    },
    /// Anything else; left to downstream handlers
    Other,
}

/// `error` body of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub code: ErrorCode,
    pub message: String,
    pub data: Option<Value>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Deserialize)]
struct RawError {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RawNotification {
    scope: String,
    event: String,
    #[serde(default)]
    data: Value,
}
