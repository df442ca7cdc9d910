//! Numeric error codes carried in `response` messages with an `error` body.
//!
//! The general codes follow JSON-RPC; operation and game-action codes are
//! specific to the lobby server.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ErrorCode {
    // General
    ParseError,
    IncorrectRequest,
    NoSuchOperation,
    IncorrectParams,

    // Operation-specific
    UnknownGame,
    AlreadyInMatch,
    UnknownMatch,
    DuplicatePlayer,
    IncorrectMatch,

    // Game actions
    GameNotPlayerTurn,
    GameNoSuchAction,
    GameIncorrectActionData,
    GameIncorrectMove,

    /// A code this client does not know; preserved verbatim.
    Unknown(i64),
}

impl ErrorCode {
    pub fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::IncorrectRequest => -32600,
            ErrorCode::NoSuchOperation => -32601,
            ErrorCode::IncorrectParams => -32602,
            ErrorCode::UnknownGame => -40100,
            ErrorCode::AlreadyInMatch => -40101,
            ErrorCode::UnknownMatch => -40102,
            ErrorCode::DuplicatePlayer => -40103,
            ErrorCode::IncorrectMatch => -40104,
            ErrorCode::GameNotPlayerTurn => -50100,
            ErrorCode::GameNoSuchAction => -50101,
            ErrorCode::GameIncorrectActionData => -50102,
            ErrorCode::GameIncorrectMove => -50103,
            ErrorCode::Unknown(code) => code,
        }
    }

    /// Short message the server pairs with this code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::IncorrectRequest => "Incorrect request",
            ErrorCode::NoSuchOperation => "No such operation",
            ErrorCode::IncorrectParams => "Incorrect parameters",
            ErrorCode::UnknownGame => "Unknown game",
            ErrorCode::AlreadyInMatch => "Already in a match",
            ErrorCode::UnknownMatch => "Unknown match",
            ErrorCode::DuplicatePlayer => "Duplicate player name",
            ErrorCode::IncorrectMatch => "Incorrect match",
            ErrorCode::GameNotPlayerTurn => "Action not allowed outside player's turn",
            ErrorCode::GameNoSuchAction => "Unsupported action in game",
            ErrorCode::GameIncorrectActionData => "Incorrect data in game action",
            ErrorCode::GameIncorrectMove => "Incorrect move",
            ErrorCode::Unknown(_) => "Unknown error",
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            -32700 => ErrorCode::ParseError,
            -32600 => ErrorCode::IncorrectRequest,
            -32601 => ErrorCode::NoSuchOperation,
            -32602 => ErrorCode::IncorrectParams,
            -40100 => ErrorCode::UnknownGame,
            -40101 => ErrorCode::AlreadyInMatch,
            -40102 => ErrorCode::UnknownMatch,
            -40103 => ErrorCode::DuplicatePlayer,
            -40104 => ErrorCode::IncorrectMatch,
            -50100 => ErrorCode::GameNotPlayerTurn,
            -50101 => ErrorCode::GameNoSuchAction,
            -50102 => ErrorCode::GameIncorrectActionData,
            -50103 => ErrorCode::GameIncorrectMove,
            other => ErrorCode::Unknown(other),
        }
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}
