//! Error types shared by the engine and its file formats.
//!
//! Every fallible operation in this crate returns [`GameError`]. Callers that
//! only care whether they can retry with corrected input can use
//! [`GameError::kind`], which folds the variants into the two families a
//! driver distinguishes: bad configuration and bad roster data.

use crate::board::TileId;
use crate::player::Token;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`GameError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Board, dice, engine setup or file access problems
    Configuration,
    /// Player roster problems (tokens, CSV rows, empty rosters)
    Validation,
}

/// Errors that can occur while building, loading or playing a game
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid board dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    #[error("Invalid board configuration: {0}")]
    InvalidBoard(String),

    #[error("No tile with id {0}")]
    MissingTile(TileId),

    #[error("Invalid dice count: {0} (must be at least 1)")]
    InvalidDiceCount(usize),

    #[error("Invalid player: {0}")]
    InvalidPlayer(String),

    #[error("Too many players (maximum is {max})")]
    TooManyPlayers { max: usize },

    #[error("Game already started")]
    GameAlreadyStarted,

    #[error("Game is over")]
    GameFinished,

    #[error("Game not ready: {0}")]
    NotReady(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid token: {0}. Allowed: {allowed}", allowed = Token::allowed_list())]
    InvalidToken(String),

    #[error("Duplicate token: {0}")]
    DuplicateToken(Token),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("No players found in roster")]
    EmptyRoster,

    #[error("Cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GameError {
    /// Which family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidToken(_)
            | GameError::DuplicateToken(_)
            | GameError::InvalidRoster(_)
            | GameError::EmptyRoster => ErrorKind::Validation,
            _ => ErrorKind::Configuration,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
