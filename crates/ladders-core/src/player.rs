//! Player state and game tokens.
//!
//! This module contains:
//! - The fixed set of tokens a player may choose
//! - Player struct with name, token, position and the skip-turn flag

use crate::board::TileId;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player identifier (index into the turn order)
pub type PlayerId = u8;

/// Game pieces a player can pick. Each token may be used by at most one
/// player in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Token {
    TopHat,
    RaceCar,
    Shoe,
    Thimble,
    Cat,
}

impl Token {
    /// All tokens, in the order they are offered to players
    pub const ALL: [Token; 5] = [
        Token::TopHat,
        Token::RaceCar,
        Token::Shoe,
        Token::Thimble,
        Token::Cat,
    ];

    /// Name used in roster files
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::TopHat => "TopHat",
            Token::RaceCar => "RaceCar",
            Token::Shoe => "Shoe",
            Token::Thimble => "Thimble",
            Token::Cat => "Cat",
        }
    }

    /// Comma separated list of every token name
    pub fn allowed_list() -> String {
        Token::ALL
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Token {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Token::ALL
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| GameError::InvalidToken(s.to_string()))
    }
}

/// A player in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Position in the turn order
    pub id: PlayerId,
    /// Display name (trimmed, never empty)
    pub name: String,
    /// Chosen game piece
    pub token: Token,
    /// Tile the token currently stands on, `None` until placed on a board
    pub current_tile: Option<TileId>,
    /// Set by a skip-turn tile; the next turn is forfeited
    pub skips_next_turn: bool,
}

impl Player {
    /// Create a new player who has not been placed on a board yet
    pub fn new(id: PlayerId, name: &str, token: Token) -> Result<Self, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidPlayer(
                "Player name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            token,
            current_tile: None,
            skips_next_turn: false,
        })
    }

    /// Put the token on a tile
    pub fn place_on_tile(&mut self, tile: TileId) {
        self.current_tile = Some(tile);
    }

    /// Id of the current tile, treating an unplaced token as standing before
    /// tile 1
    pub fn position(&self) -> TileId {
        self.current_tile.unwrap_or(0)
    }

    /// Whether the token has reached (or passed) the terminal tile
    pub fn has_won(&self, final_tile: TileId) -> bool {
        self.current_tile.is_some_and(|tile| tile >= final_tile)
    }

    /// Clear position and skip flag for a fresh game
    pub fn reset(&mut self) {
        self.current_tile = None;
        self.skips_next_turn = false;
    }
}
