//! Board layout files (JSON).
//!
//! ```json
//! {
//!   "rows": 10,
//!   "columns": 10,
//!   "tiles": [
//!     { "id": 1, "row": 9, "col": 0, "nextTile": 2 },
//!     { "id": 4, "row": 9, "col": 3, "nextTile": 5,
//!       "action": { "type": "LadderAction", "destinationTileId": 14 } }
//!   ]
//! }
//! ```
//!
//! Reading validates the whole document before a [`Board`] is built, so a
//! bad file never produces a partial board.

use crate::actions::TileAction;
use crate::board::{Board, Tile, TileId};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Serialized form of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardJson {
    pub rows: i64,
    pub columns: i64,
    pub tiles: Vec<TileJson>,
}

/// Serialized form of a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileJson {
    pub id: TileId,
    pub row: u32,
    pub col: u32,
    #[serde(rename = "nextTile", default, skip_serializing_if = "Option::is_none")]
    pub next_tile: Option<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TileAction>,
}

impl BoardJson {
    /// Capture a board, tiles in ascending id order
    pub fn from_board(board: &Board) -> Self {
        Self {
            rows: board.rows().into(),
            columns: board.cols().into(),
            tiles: board
                .tiles()
                .map(|tile| TileJson {
                    id: tile.id,
                    row: tile.row,
                    col: tile.col,
                    next_tile: tile.next,
                    action: tile.action,
                })
                .collect(),
        }
    }

    /// Validate and build the board
    pub fn into_board(self) -> Result<Board, GameError> {
        let tiles = self
            .tiles
            .into_iter()
            .map(|t| Tile {
                id: t.id,
                row: t.row,
                col: t.col,
                action: t.action,
                next: t.next_tile,
            })
            .collect();
        Board::from_tiles(self.rows, self.columns, tiles)
    }
}

/// Render a board as pretty-printed JSON
pub fn board_to_json(board: &Board) -> Result<String, GameError> {
    serde_json::to_string_pretty(&BoardJson::from_board(board))
        .map_err(|e| GameError::InvalidBoard(format!("cannot serialize board: {}", e)))
}

/// Parse and validate a board document
pub fn board_from_json(json: &str) -> Result<Board, GameError> {
    let doc: BoardJson = serde_json::from_str(json)
        .map_err(|e| GameError::InvalidBoard(format!("malformed board JSON: {}", e)))?;
    doc.into_board()
}

/// Write a board to a JSON file
pub fn save_board(board: &Board, path: impl AsRef<Path>) -> Result<(), GameError> {
    let path = path.as_ref();
    let json = board_to_json(board)?;
    std::fs::write(path, json).map_err(|e| GameError::io("write board file", path, e))?;
    info!(path = %path.display(), tiles = board.tile_count(), "saved board");
    Ok(())
}

/// Read a board from a JSON file
pub fn load_board(path: impl AsRef<Path>) -> Result<Board, GameError> {
    let path = path.as_ref();
    let json =
        std::fs::read_to_string(path).map_err(|e| GameError::io("read board file", path, e))?;
    let board = board_from_json(&json)?;
    info!(
        path = %path.display(),
        rows = board.rows(),
        cols = board.cols(),
        actions = board.action_tiles().count(),
        "loaded board"
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardPreset;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn small_doc() -> serde_json::Value {
        json!({
            "rows": 2,
            "columns": 2,
            "tiles": [
                {"id": 1, "row": 1, "col": 0, "nextTile": 2},
                {"id": 2, "row": 1, "col": 1, "nextTile": 3,
                 "action": {"type": "LadderAction", "destinationTileId": 4}},
                {"id": 3, "row": 0, "col": 1, "nextTile": 4,
                 "action": {"type": "SkipTurnAction"}},
                {"id": 4, "row": 0, "col": 0}
            ]
        })
    }

    #[test]
    fn test_round_trip_preset() {
        let board = Board::preset(BoardPreset::Standard).unwrap();
        let json = board_to_json(&board).unwrap();
        assert_eq!(board_from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_round_trip_with_skip_tiles() {
        let mut board = Board::generate(3, 4).unwrap();
        board.add_connection(2, 9).unwrap();
        board.add_connection(11, 5).unwrap();
        board.bind_action(7, TileAction::SkipTurn).unwrap();

        let json = board_to_json(&board).unwrap();
        assert_eq!(board_from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_parse_document() {
        let board = board_from_json(&small_doc().to_string()).unwrap();
        assert_eq!(board.final_tile_id(), 4);
        assert_eq!(board.get_tile(2).unwrap().action, Some(TileAction::ladder(4)));
        assert_eq!(board.get_tile(3).unwrap().action, Some(TileAction::SkipTurn));
        assert_eq!(board.get_tile(4).unwrap().next, None);
    }

    #[test]
    fn test_serialized_field_names() {
        let board = board_from_json(&small_doc().to_string()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&board_to_json(&board).unwrap()).unwrap();
        assert_eq!(value, small_doc());
    }

    #[test]
    fn test_missing_dimensions_rejected() {
        let mut doc = small_doc();
        doc.as_object_mut().unwrap().remove("columns");
        assert!(matches!(
            board_from_json(&doc.to_string()),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let mut doc = small_doc();
        doc["rows"] = json!(0);
        assert!(matches!(
            board_from_json(&doc.to_string()),
            Err(GameError::InvalidDimensions { .. })
        ));

        doc["rows"] = json!(-2);
        assert!(board_from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_duplicate_tile_id_rejected() {
        let mut doc = small_doc();
        doc["tiles"][3]["id"] = json!(3);
        assert!(matches!(
            board_from_json(&doc.to_string()),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_dangling_references_rejected() {
        let mut doc = small_doc();
        doc["tiles"][0]["nextTile"] = json!(12);
        assert!(board_from_json(&doc.to_string()).is_err());

        let mut doc = small_doc();
        doc["tiles"][1]["action"]["destinationTileId"] = json!(40);
        assert!(board_from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_ladder_without_destination_rejected() {
        let mut doc = small_doc();
        doc["tiles"][1]["action"] = json!({"type": "LadderAction"});
        assert!(board_from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_syntax_error_is_board_error() {
        assert!(matches!(
            board_from_json("{ \"rows\": 3, "),
            Err(GameError::InvalidBoard(_))
        ));
    }
}
