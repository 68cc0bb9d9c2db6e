//! Subcommand handlers.

use crate::cli::{ConnectionArg, PlayerArg};
use anyhow::{bail, Context, Result};
use ladders_core::{
    board_to_json, load_roster, save_board, save_roster, Board, BoardPreset, BoardSpec,
    GameConfig, GameEngine, GameEvent, GameObserver, PlayerId, RosterEntry, TileAction, TileId,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load the config file if one was given, otherwise the defaults
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Prints events to stdout as they happen
struct ConsoleReporter {
    names: HashMap<PlayerId, String>,
    json: bool,
}

impl ConsoleReporter {
    fn name(&self, id: PlayerId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or("?")
    }
}

impl GameObserver for ConsoleReporter {
    fn on_event(&mut self, event: &GameEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "cannot serialize event"),
            }
            return;
        }

        match event {
            GameEvent::GameStarted { players } => println!("Game started with {} players", players),
            GameEvent::DiceRolled { player, values, total } => {
                println!("{} rolls {:?} = {}", self.name(*player), values, total)
            }
            GameEvent::PlayerMoved { player, from, to } => {
                println!("  {} moves {} -> {}", self.name(*player), from, to)
            }
            GameEvent::LadderClimbed { player, from, to } => {
                println!("  {} climbs a ladder {} -> {}", self.name(*player), from, to)
            }
            GameEvent::ChuteSlid { player, from, to } => {
                println!("  {} slides down a chute {} -> {}", self.name(*player), from, to)
            }
            GameEvent::SkipTurnAssigned { player } => {
                println!("  {} will miss the next turn", self.name(*player))
            }
            GameEvent::TurnSkipped { player } => println!("{} misses this turn", self.name(*player)),
            GameEvent::TurnEnded { .. } => {}
            GameEvent::GameOver { winner } => println!("{} wins!", self.name(*winner)),
        }
    }
}

/// End-of-game report printed with `--json`
#[derive(Debug, Serialize)]
struct GameSummary<'a> {
    winner: Option<&'a str>,
    rounds: u32,
    positions: Vec<(&'a str, TileId)>,
}

/// Options for `ladders play`
pub struct PlayOptions {
    pub preset: BoardPreset,
    pub board_file: Option<PathBuf>,
    pub players: Option<PathBuf>,
    pub player: Vec<PlayerArg>,
    pub dice: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

/// Play a full game and report it
pub fn play(mut config: GameConfig, opts: PlayOptions) -> Result<()> {
    if let Some(dice) = opts.dice {
        config.dice_count = dice;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }
    let mut game = GameEngine::with_config(config).context("Invalid game configuration")?;

    match &opts.board_file {
        Some(path) => game
            .load_board(path)
            .with_context(|| format!("Failed to load board from {}", path.display()))?,
        None => game.create_board(BoardSpec::Preset(opts.preset))?,
    }
    game.create_dice(game.config().dice_count)?;

    match &opts.players {
        Some(path) => game
            .load_roster(path)
            .with_context(|| format!("Failed to load players from {}", path.display()))?,
        None if opts.player.is_empty() => bail!("No players: pass --player NAME:TOKEN or --players FILE"),
        None => {
            for p in &opts.player {
                game.add_player(&p.name, p.token)
                    .with_context(|| format!("Cannot add player {}", p.name))?;
            }
        }
    }

    let names = game
        .players()
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();
    game.add_observer(Box::new(ConsoleReporter {
        names,
        json: opts.json,
    }));

    let max_rounds = game.config().max_rounds;
    while !game.is_finished() && game.rounds_played() < max_rounds {
        game.play_round()?;
    }

    if !game.is_finished() {
        warn!(rounds = max_rounds, "no winner within the round limit");
    }

    if opts.json {
        let summary = GameSummary {
            winner: game.winner().map(|p| p.name.as_str()),
            rounds: game.rounds_played(),
            positions: game
                .players()
                .iter()
                .map(|p| (p.name.as_str(), p.position()))
                .collect(),
        };
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        match game.winner() {
            Some(winner) => println!(
                "{} ({}) won after {} rounds",
                winner.name,
                winner.token,
                game.rounds_played()
            ),
            None => println!("No winner after {} rounds", game.rounds_played()),
        }
    }
    Ok(())
}

/// Build a board and write it out
pub fn board(
    preset: Option<BoardPreset>,
    rows: u32,
    cols: u32,
    connections: &[ConnectionArg],
    skip_tiles: &[TileId],
    output: Option<&Path>,
) -> Result<()> {
    let mut board = match preset {
        Some(preset) => Board::preset(preset)?,
        None => Board::generate(rows, cols)?,
    };
    for c in connections {
        board
            .add_connection(c.from, c.to)
            .with_context(|| format!("Cannot connect {} to {}", c.from, c.to))?;
    }
    for &tile in skip_tiles {
        board
            .bind_action(tile, TileAction::SkipTurn)
            .with_context(|| format!("Cannot make tile {} a skip tile", tile))?;
    }

    match output {
        Some(path) => {
            save_board(&board, path)
                .with_context(|| format!("Failed to write board to {}", path.display()))?;
            println!("Wrote {}x{} board to {}", board.rows(), board.cols(), path.display());
        }
        None => println!("{}", board_to_json(&board)?),
    }
    Ok(())
}

/// Write a roster file, or check an existing one
pub fn roster(players: &[PlayerArg], output: Option<&Path>, check: Option<&Path>) -> Result<()> {
    if let Some(path) = check {
        let entries = load_roster(path)
            .with_context(|| format!("Invalid roster {}", path.display()))?;
        for entry in &entries {
            println!("{} ({})", entry.name, entry.token);
        }
        return Ok(());
    }

    let Some(path) = output else {
        bail!("No output file given");
    };
    let entries: Vec<RosterEntry> = players.iter().map(RosterEntry::from).collect();
    save_roster(&entries, path)
        .with_context(|| format!("Failed to write roster to {}", path.display()))?;
    info!(players = entries.len(), "roster written");
    println!("Wrote {} players to {}", entries.len(), path.display());
    Ok(())
}
