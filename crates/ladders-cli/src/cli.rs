//! Command-line interface for the ladders binary.

use clap::{Parser, Subcommand};
use ladders_core::{BoardPreset, RosterEntry, TileId, Token};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Ladders - chutes and ladders in the terminal
#[derive(Parser, Debug)]
#[command(name = "ladders")]
#[command(about = "Play chutes and ladders, or build boards and rosters", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game configuration file (JSON)
    #[arg(long, global = true, env = "LADDERS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game until someone wins
    Play {
        /// Shipped board to play on
        #[arg(long, default_value = "standard", conflicts_with = "board_file")]
        preset: BoardPreset,

        /// Board file to play on instead of a preset
        #[arg(long)]
        board_file: Option<PathBuf>,

        /// Roster file with the players
        #[arg(long, conflicts_with = "player")]
        players: Option<PathBuf>,

        /// Player as NAME:TOKEN (repeatable)
        #[arg(short, long = "player")]
        player: Vec<PlayerArg>,

        /// Dice rolled each turn (overrides the config file)
        #[arg(long)]
        dice: Option<usize>,

        /// Dice seed for a reproducible game (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a board file
    Board {
        /// Start from a shipped board
        #[arg(long, conflicts_with_all = ["rows", "cols"])]
        preset: Option<BoardPreset>,

        /// Rows of a generated board
        #[arg(long, default_value_t = 10)]
        rows: u32,

        /// Columns of a generated board
        #[arg(long, default_value_t = 10)]
        cols: u32,

        /// Ladder or chute as FROM:TO (repeatable)
        #[arg(long = "connect")]
        connections: Vec<ConnectionArg>,

        /// Tile that makes a player skip a turn (repeatable)
        #[arg(long = "skip")]
        skip_tiles: Vec<TileId>,

        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write or check a roster file
    Roster {
        /// Player as NAME:TOKEN (repeatable)
        #[arg(short, long = "player", required_unless_present = "check")]
        player: Vec<PlayerArg>,

        /// Roster file to write
        #[arg(short, long, required_unless_present = "check")]
        output: Option<PathBuf>,

        /// Validate an existing roster file and list its players
        #[arg(long, conflicts_with_all = ["player", "output"])]
        check: Option<PathBuf>,
    },
}

/// Bad command-line value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("Expected NAME:TOKEN, got '{0}'")]
    Player(String),

    #[error("Expected FROM:TO tile ids, got '{0}'")]
    Connection(String),

    #[error("{0}")]
    Token(String),
}

/// `--player NAME:TOKEN`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerArg {
    pub name: String,
    pub token: Token,
}

impl FromStr for PlayerArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, token) = s
            .rsplit_once(':')
            .ok_or_else(|| ArgError::Player(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ArgError::Player(s.to_string()));
        }
        let token = token.parse().map_err(|e: ladders_core::GameError| ArgError::Token(e.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            token,
        })
    }
}

impl From<&PlayerArg> for RosterEntry {
    fn from(arg: &PlayerArg) -> Self {
        RosterEntry::new(&arg.name, arg.token)
    }
}

/// `--connect FROM:TO`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionArg {
    pub from: TileId,
    pub to: TileId,
}

impl FromStr for ConnectionArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ArgError::Connection(s.to_string());
        let (from, to) = s.split_once(':').ok_or_else(err)?;
        Ok(Self {
            from: from.trim().parse().map_err(|_| err())?,
            to: to.trim().parse().map_err(|_| err())?,
        })
    }
}
