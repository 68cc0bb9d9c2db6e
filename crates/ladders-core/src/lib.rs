//! Ladders - a chutes-and-ladders game engine
//!
//! This crate provides the core game logic:
//! - Snake-numbered grid boards with ladder, chute and skip-turn tiles
//! - Dice sets with optional fixed seeds
//! - Players and their tokens
//! - A turn state machine that reports what happened as [`GameEvent`]s
//! - JSON board files and CSV roster files
//!
//! # Example
//!
//! ```
//! use ladders_core::{BoardPreset, BoardSpec, GameEngine, Token};
//!
//! let mut game = GameEngine::new();
//! game.create_board(BoardSpec::Preset(BoardPreset::Standard)).unwrap();
//! game.create_seeded_dice(2, 42).unwrap();
//! game.add_player("Alice", Token::TopHat).unwrap();
//! game.add_player("Bob", Token::Cat).unwrap();
//!
//! while !game.is_finished() {
//!     game.play_round().unwrap();
//! }
//! assert!(game.winner().is_some());
//! ```

pub mod actions;
pub mod board;
pub mod board_file;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod grid;
pub mod player;
pub mod roster;

// Re-export commonly used types
pub use actions::{GameEvent, TileAction};
pub use board::{Board, BoardPreset, Tile, TileId, START_TILE};
pub use board_file::{board_from_json, board_to_json, load_board, save_board, BoardJson, TileJson};
pub use config::GameConfig;
pub use dice::{DiceRoll, DiceSet, Die};
pub use error::{ErrorKind, GameError};
pub use game::{BoardSpec, GameEngine, GameObserver, GamePhase, ObserverId};
pub use grid::{GridCoord, SnakeLayout};
pub use player::{Player, PlayerId, Token};
pub use roster::{load_roster, parse_roster, roster_to_csv, save_roster, RosterEntry, ROSTER_HEADER};
