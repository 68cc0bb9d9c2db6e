//! Grid coordinates and the snake (boustrophedon) tile numbering.
//!
//! Rows are counted from the top (row 0 is drawn first) and columns from the
//! left. Tile ids start at 1 in the bottom-left corner and run left to right
//! along the bottom row, then right to left along the row above it, and so on,
//! so the highest id always sits at the end of the top row.

use serde::{Deserialize, Serialize};

/// Position of a tile on the rectangular grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct GridCoord {
    /// Row, 0 at the top
    pub row: u32,
    /// Column, 0 at the left
    pub col: u32,
}

impl GridCoord {
    /// Create a new grid coordinate
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Dimensions of a snake-numbered grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeLayout {
    pub rows: u32,
    pub cols: u32,
}

impl SnakeLayout {
    /// Create a layout. Callers are expected to have checked that both
    /// dimensions are positive.
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of tiles on the grid
    pub fn tile_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Whether the coordinate lies on the grid
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Tile id for a grid position.
    ///
    /// Even rows (counted from the bottom) run left to right, odd rows right
    /// to left.
    pub fn tile_id(&self, coord: GridCoord) -> u32 {
        let row_from_bottom = self.rows - 1 - coord.row;
        if row_from_bottom % 2 == 0 {
            row_from_bottom * self.cols + coord.col + 1
        } else {
            row_from_bottom * self.cols + (self.cols - coord.col)
        }
    }

    /// Grid position of a tile id, or `None` if the id is off the grid
    pub fn coord_of(&self, tile_id: u32) -> Option<GridCoord> {
        if tile_id == 0 || tile_id > self.tile_count() {
            return None;
        }

        let index = tile_id - 1;
        let row_from_bottom = index / self.cols;
        let offset = index % self.cols;
        let col = if row_from_bottom % 2 == 0 {
            offset
        } else {
            self.cols - 1 - offset
        };

        Some(GridCoord::new(self.rows - 1 - row_from_bottom, col))
    }

    /// All grid positions, row by row from the top
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridCoord::new(row, col)))
    }
}
