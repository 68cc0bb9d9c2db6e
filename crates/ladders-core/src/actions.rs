//! Tile actions and the events the engine reports.
//!
//! This module defines what can happen when a token lands on a tile, and
//! the events that observers receive as the game progresses.

use crate::board::{Board, TileId};
use crate::error::GameError;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something that happens to a player who lands on a tile.
///
/// The serialized form is the `action` object of the board file:
/// `{"type": "LadderAction", "destinationTileId": 14}` or
/// `{"type": "SkipTurnAction"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TileAction {
    /// Relocate to another tile. Upward is a ladder, downward a chute.
    #[serde(rename = "LadderAction")]
    Ladder {
        #[serde(rename = "destinationTileId")]
        destination: TileId,
    },
    /// Forfeit the next turn
    #[serde(rename = "SkipTurnAction")]
    SkipTurn,
}

impl TileAction {
    /// Ladder (or chute) to the given tile
    pub const fn ladder(destination: TileId) -> Self {
        TileAction::Ladder { destination }
    }

    /// Tile this action moves a player to, if any
    pub fn destination(&self) -> Option<TileId> {
        match self {
            TileAction::Ladder { destination } => Some(*destination),
            TileAction::SkipTurn => None,
        }
    }

    /// Apply the action to a player standing on a tile of `board`.
    ///
    /// A ladder whose destination is missing from the board means the board
    /// itself is corrupt, so that case is an error rather than a no-op.
    pub fn perform(&self, player: &mut Player, board: &Board) -> Result<GameEvent, GameError> {
        match *self {
            TileAction::Ladder { destination } => {
                let from = player.position();
                if board.get_tile(destination).is_none() {
                    return Err(GameError::InvalidBoard(format!(
                        "ladder from tile {} leads to missing tile {}",
                        from, destination
                    )));
                }

                player.place_on_tile(destination);

                if destination > from {
                    debug!(player = %player.name, from, to = destination, "climbed ladder");
                    Ok(GameEvent::LadderClimbed {
                        player: player.id,
                        from,
                        to: destination,
                    })
                } else {
                    debug!(player = %player.name, from, to = destination, "slid down chute");
                    Ok(GameEvent::ChuteSlid {
                        player: player.id,
                        from,
                        to: destination,
                    })
                }
            }
            TileAction::SkipTurn => {
                player.skips_next_turn = true;
                debug!(player = %player.name, "must skip next turn");
                Ok(GameEvent::SkipTurnAssigned { player: player.id })
            }
        }
    }
}

/// Events emitted by the engine, in the order they happen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First round requested, play has begun
    GameStarted { players: usize },

    /// Dice were rolled for a player
    DiceRolled {
        player: PlayerId,
        values: Vec<u8>,
        total: u32,
    },

    /// A token moved by dice roll (or was placed directly)
    PlayerMoved {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    /// A token went up a ladder
    LadderClimbed {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    /// A token went down a chute
    ChuteSlid {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    /// A player landed on a skip-turn tile
    SkipTurnAssigned { player: PlayerId },

    /// A player forfeited this turn
    TurnSkipped { player: PlayerId },

    /// Turn passed to the next player
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// A player reached the terminal tile
    GameOver { winner: PlayerId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Token;

    fn player_on(tile: TileId) -> Player {
        let mut player = Player::new(0, "Alice", Token::TopHat).unwrap();
        player.place_on_tile(tile);
        player
    }

    #[test]
    fn test_ladder_moves_up() {
        let board = Board::generate(10, 10).unwrap();
        let mut player = player_on(4);

        let event = TileAction::ladder(14).perform(&mut player, &board).unwrap();

        assert_eq!(player.current_tile, Some(14));
        assert_eq!(
            event,
            GameEvent::LadderClimbed {
                player: 0,
                from: 4,
                to: 14
            }
        );
    }

    #[test]
    fn test_ladder_moves_down_as_chute() {
        let board = Board::generate(10, 10).unwrap();
        let mut player = player_on(17);

        let event = TileAction::ladder(7).perform(&mut player, &board).unwrap();

        assert_eq!(player.current_tile, Some(7));
        assert_eq!(
            event,
            GameEvent::ChuteSlid {
                player: 0,
                from: 17,
                to: 7
            }
        );
    }

    #[test]
    fn test_ladder_to_missing_tile_is_error() {
        let board = Board::generate(3, 3).unwrap();
        let mut player = player_on(2);

        let result = TileAction::ladder(50).perform(&mut player, &board);

        assert!(matches!(result, Err(GameError::InvalidBoard(_))));
        assert_eq!(player.current_tile, Some(2));
    }

    #[test]
    fn test_skip_turn_sets_flag_only() {
        let board = Board::generate(3, 3).unwrap();
        let mut player = player_on(5);

        let event = TileAction::SkipTurn.perform(&mut player, &board).unwrap();

        assert!(player.skips_next_turn);
        assert_eq!(player.current_tile, Some(5));
        assert_eq!(event, GameEvent::SkipTurnAssigned { player: 0 });
    }

    #[test]
    fn test_action_json_shape() {
        let ladder = serde_json::to_value(TileAction::ladder(14)).unwrap();
        assert_eq!(
            ladder,
            serde_json::json!({"type": "LadderAction", "destinationTileId": 14})
        );

        let skip = serde_json::to_value(TileAction::SkipTurn).unwrap();
        assert_eq!(skip, serde_json::json!({"type": "SkipTurnAction"}));
    }

    #[test]
    fn test_unknown_action_type_rejected() {
        let result: Result<TileAction, _> =
            serde_json::from_str(r#"{"type": "TeleportAction", "destinationTileId": 3}"#);
        assert!(result.is_err());
    }
}
