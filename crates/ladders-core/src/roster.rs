//! Player roster files (CSV).
//!
//! The first line is a header and is skipped on read; every other non-empty
//! line is `Name,Token`. Tokens must be one of [`Token::ALL`] and may appear
//! only once per file.

use crate::error::GameError;
use crate::player::{Player, Token};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Header written at the top of every roster file
pub const ROSTER_HEADER: &str = "PlayerName,PlayerToken";

/// One row of a roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub token: Token,
}

impl RosterEntry {
    /// Create an entry, trimming the name
    pub fn new(name: &str, token: Token) -> Self {
        Self {
            name: name.trim().to_string(),
            token,
        }
    }
}

impl From<&Player> for RosterEntry {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            token: player.token,
        }
    }
}

/// Parse roster CSV text into entries, in file order
pub fn parse_roster(csv: &str) -> Result<Vec<RosterEntry>, GameError> {
    let mut entries = Vec::new();
    let mut used = HashSet::new();

    for (index, line) in csv.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line_no = index + 1;
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 2 {
            return Err(GameError::InvalidRoster(format!(
                "line {}: expected Name,Token",
                line_no
            )));
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return Err(GameError::InvalidRoster(format!(
                "line {}: player name is empty",
                line_no
            )));
        }

        let token: Token = parts[1].parse()?;
        if !used.insert(token) {
            return Err(GameError::DuplicateToken(token));
        }

        entries.push(RosterEntry::new(name, token));
    }

    if entries.is_empty() {
        return Err(GameError::EmptyRoster);
    }

    Ok(entries)
}

/// Render entries as roster CSV, validating every row first
pub fn roster_to_csv(entries: &[RosterEntry]) -> Result<String, GameError> {
    if entries.is_empty() {
        return Err(GameError::EmptyRoster);
    }

    let mut used = HashSet::new();
    let mut csv = String::from(ROSTER_HEADER);
    csv.push('\n');

    for entry in entries {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidRoster("player name is empty".to_string()));
        }
        if name.contains([',', '\n', '\r']) {
            return Err(GameError::InvalidRoster(format!(
                "player name '{}' contains a separator",
                name
            )));
        }
        if !used.insert(entry.token) {
            return Err(GameError::DuplicateToken(entry.token));
        }

        csv.push_str(name);
        csv.push(',');
        csv.push_str(entry.token.as_str());
        csv.push('\n');
    }

    Ok(csv)
}

/// Read a roster file
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<RosterEntry>, GameError> {
    let path = path.as_ref();
    let csv =
        std::fs::read_to_string(path).map_err(|e| GameError::io("read player file", path, e))?;
    let entries = parse_roster(&csv).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected roster");
    })?;
    info!(path = %path.display(), players = entries.len(), "loaded roster");
    Ok(entries)
}

/// Write a roster file. Nothing is written if any entry is invalid.
pub fn save_roster(entries: &[RosterEntry], path: impl AsRef<Path>) -> Result<(), GameError> {
    let path = path.as_ref();
    let csv = roster_to_csv(entries)?;
    std::fs::write(path, csv).map_err(|e| GameError::io("write player file", path, e))?;
    info!(path = %path.display(), players = entries.len(), "saved roster");
    Ok(())
}
