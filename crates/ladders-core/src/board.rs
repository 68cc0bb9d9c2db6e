//! Game board representation: tiles, snake layout and the preset boards.
//!
//! This module contains:
//! - `Tile`, an addressable cell with an optional action and `next` link
//! - `Board`, which owns every tile and validates its own invariants
//! - Board generation using the snake layout from [`crate::grid`]
//! - The small/standard/large preset boards
//!
//! Links between tiles are stored as ids and resolved through the board, so
//! a `Board` is a plain value with no internal references.

use crate::actions::TileAction;
use crate::error::GameError;
use crate::grid::{GridCoord, SnakeLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tile identifier, 1-based along the snake path
pub type TileId = u32;

/// The tile every token starts on
pub const START_TILE: TileId = 1;

/// Largest board accepted, in tiles (100x100)
pub const MAX_TILES: u32 = 10_000;

/// A single cell of the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique id within the board
    pub id: TileId,
    /// Row, 0 at the top
    pub row: u32,
    /// Column, 0 at the left
    pub col: u32,
    /// What happens when a token lands here
    pub action: Option<TileAction>,
    /// Following tile along the path
    pub next: Option<TileId>,
}

impl Tile {
    /// Create a plain tile with no action and no link
    pub fn new(id: TileId, row: u32, col: u32) -> Self {
        Self {
            id,
            row,
            col,
            action: None,
            next: None,
        }
    }

    /// Grid position of this tile
    pub fn coord(&self) -> GridCoord {
        GridCoord::new(self.row, self.col)
    }
}

/// The complete board. Holds exactly `rows * cols` tiles with ids
/// `1..=rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u32,
    cols: u32,
    tiles: BTreeMap<TileId, Tile>,
}

impl Board {
    /// Generate a board with snake numbering and every tile linked to the
    /// next id. No actions are bound.
    pub fn generate(rows: u32, cols: u32) -> Result<Self, GameError> {
        let layout = checked_layout(rows.into(), cols.into())?;
        Ok(Self::snake(layout))
    }

    fn snake(layout: SnakeLayout) -> Self {
        let final_id = layout.tile_count();
        let tiles = layout
            .coords()
            .map(|coord| {
                let id = layout.tile_id(coord);
                let mut tile = Tile::new(id, coord.row, coord.col);
                if id < final_id {
                    tile.next = Some(id + 1);
                }
                (id, tile)
            })
            .collect();

        Self {
            rows: layout.rows,
            cols: layout.cols,
            tiles,
        }
    }

    /// Build a board from explicit tiles, checking every invariant.
    ///
    /// Fails with `InvalidDimensions` or `InvalidBoard` instead of returning
    /// a partially valid board.
    pub fn from_tiles(rows: i64, cols: i64, tiles: Vec<Tile>) -> Result<Self, GameError> {
        let layout = checked_layout(rows, cols)?;
        let expected = layout.tile_count();

        let mut by_id = BTreeMap::new();
        for tile in tiles {
            if tile.id == 0 || tile.id > expected {
                return Err(GameError::InvalidBoard(format!(
                    "tile id {} outside 1..={}",
                    tile.id, expected
                )));
            }
            if !layout.contains(tile.coord()) {
                return Err(GameError::InvalidBoard(format!(
                    "tile {} at row {}, col {} lies outside a {}x{} board",
                    tile.id, tile.row, tile.col, layout.rows, layout.cols
                )));
            }
            let id = tile.id;
            if by_id.insert(id, tile).is_some() {
                return Err(GameError::InvalidBoard(format!("duplicate tile id {}", id)));
            }
        }

        if by_id.len() as u32 != expected {
            return Err(GameError::InvalidBoard(format!(
                "expected {} tiles, found {}",
                expected,
                by_id.len()
            )));
        }

        let board = Self {
            rows: layout.rows,
            cols: layout.cols,
            tiles: by_id,
        };
        board.validate_links()?;
        Ok(board)
    }

    /// Generate one of the preset boards. Every connection goes through
    /// [`Board::bind_action`], so a bad preset table is reported, not skipped.
    pub fn preset(preset: BoardPreset) -> Result<Self, GameError> {
        preset.build()
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Id of the terminal tile
    pub fn final_tile_id(&self) -> TileId {
        self.rows * self.cols
    }

    /// Get a tile by id
    pub fn get_tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Get a tile by id, treating a missing tile as a board defect
    pub fn tile(&self, id: TileId) -> Result<&Tile, GameError> {
        self.tiles.get(&id).ok_or(GameError::MissingTile(id))
    }

    /// All tiles in ascending id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tiles with an action bound, in ascending id order
    pub fn action_tiles(&self) -> impl Iterator<Item = (TileId, TileAction)> + '_ {
        self.tiles
            .values()
            .filter_map(|tile| tile.action.map(|action| (tile.id, action)))
    }

    /// Follow `next` links starting at tile 1. Stops at a tile without a
    /// link, and never yields more tiles than the board holds.
    pub fn path(&self) -> impl Iterator<Item = &Tile> + '_ {
        let mut current = self.get_tile(START_TILE);
        let mut remaining = self.tiles.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let tile = current?;
            current = tile.next.and_then(|next| self.get_tile(next));
            Some(tile)
        })
    }

    /// Bind an action to a tile during setup.
    ///
    /// The tile must exist and must not already carry an action. A ladder
    /// must lead to another tile on this board.
    pub fn bind_action(&mut self, tile_id: TileId, action: TileAction) -> Result<(), GameError> {
        if let Some(destination) = action.destination() {
            self.check_destination(tile_id, destination)?;
        }

        let tile = self.tiles.get_mut(&tile_id).ok_or_else(|| {
            GameError::InvalidBoard(format!("cannot bind action to missing tile {}", tile_id))
        })?;

        if tile.action.is_some() {
            return Err(GameError::InvalidBoard(format!(
                "tile {} already has an action",
                tile_id
            )));
        }

        tile.action = Some(action);
        Ok(())
    }

    /// Bind a ladder (destination above) or chute (destination below)
    pub fn add_connection(&mut self, from: TileId, to: TileId) -> Result<(), GameError> {
        self.bind_action(from, TileAction::ladder(to))
    }

    fn check_destination(&self, from: TileId, destination: TileId) -> Result<(), GameError> {
        if destination == from {
            return Err(GameError::InvalidBoard(format!(
                "ladder on tile {} leads to itself",
                from
            )));
        }
        if !self.tiles.contains_key(&destination) {
            return Err(GameError::InvalidBoard(format!(
                "ladder on tile {} leads to missing tile {}",
                from, destination
            )));
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), GameError> {
        for tile in self.tiles.values() {
            if let Some(next) = tile.next {
                if !self.tiles.contains_key(&next) {
                    return Err(GameError::InvalidBoard(format!(
                        "tile {} links to missing tile {}",
                        tile.id, next
                    )));
                }
            }
            if let Some(destination) = tile.action.and_then(|a| a.destination()) {
                self.check_destination(tile.id, destination)?;
            }
        }
        Ok(())
    }
}

fn checked_layout(rows: i64, cols: i64) -> Result<SnakeLayout, GameError> {
    let invalid = || GameError::InvalidDimensions { rows, cols };

    if rows <= 0 || cols <= 0 {
        return Err(invalid());
    }
    let r = u32::try_from(rows).map_err(|_| invalid())?;
    let c = u32::try_from(cols).map_err(|_| invalid())?;
    match r.checked_mul(c) {
        Some(n) if n <= MAX_TILES => {}
        _ => return Err(invalid()),
    }

    Ok(SnakeLayout::new(r, c))
}

/// Boards shipped with the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardPreset {
    /// 6x6, a quick game
    Small,
    /// 10x10, the classic board
    Standard,
    /// 12x12
    Large,
}

impl BoardPreset {
    /// All presets
    pub const ALL: [BoardPreset; 3] = [BoardPreset::Small, BoardPreset::Standard, BoardPreset::Large];

    /// Board dimensions as (rows, cols)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            BoardPreset::Small => (6, 6),
            BoardPreset::Standard => (10, 10),
            BoardPreset::Large => (12, 12),
        }
    }

    /// Ladders and chutes as (from, to) pairs
    pub fn connections(&self) -> &'static [(TileId, TileId)] {
        match self {
            BoardPreset::Small => &[(3, 12), (8, 18), (22, 5)],
            BoardPreset::Standard => &[
                // Ladders
                (4, 14),
                (9, 31),
                (20, 38),
                (28, 84),
                (40, 59),
                (51, 67),
                (63, 81),
                // Chutes
                (17, 7),
                (54, 34),
                (62, 19),
                (64, 60),
                (87, 24),
                (93, 73),
                (95, 75),
                (99, 78),
            ],
            BoardPreset::Large => &[(5, 25), (40, 60), (100, 120), (121, 50), (136, 111)],
        }
    }

    fn build(&self) -> Result<Board, GameError> {
        let (rows, cols) = self.dimensions();
        let mut board = Board::generate(rows, cols)?;
        for &(from, to) in self.connections() {
            board.add_connection(from, to).map_err(|e| {
                GameError::InvalidBoard(format!("{} preset: {}", self, e))
            })?;
        }
        Ok(board)
    }
}

impl fmt::Display for BoardPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoardPreset::Small => "small",
            BoardPreset::Standard => "standard",
            BoardPreset::Large => "large",
        };
        f.write_str(name)
    }
}

impl FromStr for BoardPreset {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(BoardPreset::Small),
            "standard" => Ok(BoardPreset::Standard),
            "large" => Ok(BoardPreset::Large),
            other => Err(GameError::InvalidConfig(format!(
                "unknown board preset '{}' (expected small, standard or large)",
                other
            ))),
        }
    }
}
