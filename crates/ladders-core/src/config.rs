//! Engine configuration.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default player cap
pub const DEFAULT_MAX_PLAYERS: usize = 5;

/// Settings for a game session. Missing fields in a config file fall back to
/// the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dice rolled each turn
    pub dice_count: usize,
    /// Smallest roster that can start a game
    pub min_players: usize,
    /// Largest roster allowed
    pub max_players: usize,
    /// Rounds a driver plays before giving up on a game
    pub max_rounds: u32,
    /// Fixed dice seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice_count: 2,
            min_players: 1,
            max_players: DEFAULT_MAX_PLAYERS,
            max_rounds: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config document and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GameError::io("read config file", path, e))?;
        Self::from_json(&json)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), GameError> {
        if self.dice_count < 1 {
            return Err(GameError::InvalidDiceCount(self.dice_count));
        }
        if self.max_players < 1 {
            return Err(GameError::InvalidConfig(
                "max_players must be at least 1".to_string(),
            ));
        }
        if self.max_players > usize::from(u8::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "max_players ({}) is too large",
                self.max_players
            )));
        }
        if self.min_players > self.max_players {
            return Err(GameError::InvalidConfig(format!(
                "min_players ({}) exceeds max_players ({})",
                self.min_players, self.max_players
            )));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
