//! Core game state machine.
//!
//! This module contains the main `GameEngine` struct and the turn protocol.
//! A driver assembles a board, dice and players, then calls
//! [`GameEngine::play_round`] until [`GameEngine::is_finished`] is true.

use crate::actions::GameEvent;
use crate::board::{Board, BoardPreset, TileId, START_TILE};
use crate::board_file;
use crate::config::GameConfig;
use crate::dice::{DiceRoll, DiceSet};
use crate::error::GameError;
use crate::player::{Player, PlayerId, Token};
use crate::roster::{self, RosterEntry};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Board, dice and players are still being assembled
    NotStarted,
    /// At least one round has been requested
    InProgress,
    /// A player reached the terminal tile. Absorbs every further call.
    Finished { winner: PlayerId },
}

/// How to build a board for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSpec {
    /// Plain snake board with no actions
    Generated { rows: u32, cols: u32 },
    /// One of the shipped boards
    Preset(BoardPreset),
}

/// Receives engine events as they happen
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> GameObserver for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by [`GameEngine::add_observer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The complete game session
pub struct GameEngine {
    config: GameConfig,
    board: Option<Board>,
    dice: Option<DiceSet>,
    /// Turn order is insertion order
    players: Vec<Player>,
    /// Index of the player whose turn it is
    current_player: usize,
    phase: GamePhase,
    /// Completed rounds
    rounds_played: u32,
    observers: Vec<(ObserverId, Box<dyn GameObserver>)>,
    next_observer_id: u64,
}

impl GameEngine {
    /// Create an empty engine with the default configuration
    pub fn new() -> Self {
        Self::with_config_unchecked(GameConfig::default())
    }

    /// Create an empty engine after validating `config`
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: GameConfig) -> Self {
        Self {
            config,
            board: None,
            dice: None,
            players: Vec::new(),
            current_player: 0,
            phase: GamePhase::NotStarted,
            rounds_played: 0,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ==================== Setup ====================

    /// Build and bind a new board
    pub fn create_board(&mut self, spec: BoardSpec) -> Result<(), GameError> {
        let board = match spec {
            BoardSpec::Generated { rows, cols } => Board::generate(rows, cols)?,
            BoardSpec::Preset(preset) => Board::preset(preset)?,
        };
        self.set_board(board);
        Ok(())
    }

    /// Bind a board. Replacing the board resets the session so every token
    /// starts again on tile 1 of the new board.
    pub fn set_board(&mut self, board: Board) {
        info!(
            rows = board.rows(),
            cols = board.cols(),
            actions = board.action_tiles().count(),
            "board bound"
        );
        self.board = Some(board);
        self.reset_game();
    }

    /// The bound board
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Create the dice, using the configured seed if there is one
    pub fn create_dice(&mut self, count: usize) -> Result<(), GameError> {
        let dice = match self.config.seed {
            Some(seed) => DiceSet::with_seed(count, seed)?,
            None => DiceSet::new(count)?,
        };
        self.dice = Some(dice);
        Ok(())
    }

    /// Create dice with an explicit seed
    pub fn create_seeded_dice(&mut self, count: usize, seed: u64) -> Result<(), GameError> {
        self.dice = Some(DiceSet::with_seed(count, seed)?);
        Ok(())
    }

    /// Change the number of dice (settings change, allowed mid-game)
    pub fn set_dice_count(&mut self, count: usize) -> Result<(), GameError> {
        match self.dice.as_mut() {
            Some(dice) => dice.set_count(count),
            None => self.create_dice(count),
        }
    }

    /// The dice
    pub fn dice(&self) -> Option<&DiceSet> {
        self.dice.as_ref()
    }

    /// Add a player to the end of the turn order
    pub fn add_player(&mut self, name: &str, token: Token) -> Result<PlayerId, GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::TooManyPlayers {
                max: self.config.max_players,
            });
        }
        if self.players.iter().any(|p| p.token == token) {
            warn!(%token, "token already taken");
            return Err(GameError::DuplicateToken(token));
        }

        let id = self.players.len() as PlayerId;
        let mut player = Player::new(id, name, token)?;
        if self.board.is_some() {
            player.place_on_tile(START_TILE);
        }

        info!(player = %player.name, %token, "player joined");
        self.players.push(player);
        Ok(id)
    }

    /// Replace the roster. Validates everything before touching the
    /// current players.
    pub fn set_roster(&mut self, entries: &[RosterEntry]) -> Result<(), GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::GameAlreadyStarted);
        }
        if entries.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        if entries.len() > self.config.max_players {
            return Err(GameError::TooManyPlayers {
                max: self.config.max_players,
            });
        }

        let previous = std::mem::take(&mut self.players);
        for entry in entries {
            if let Err(e) = self.add_player(&entry.name, entry.token) {
                self.players = previous;
                return Err(e);
            }
        }
        self.current_player = 0;
        Ok(())
    }

    /// All players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by id
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.players
            .get(self.current_player)
            .ok_or(GameError::NotReady("no players"))
    }

    // ==================== Observers ====================

    /// Register an observer. It is called synchronously for every event.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Unregister an observer. Returns false if it was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn emit(&mut self, events: &mut Vec<GameEvent>, event: GameEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_event(&event);
        }
        events.push(event);
    }

    // ==================== State ====================

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Get the winner if the game is finished
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::Finished { winner } => self.get_player(winner),
            _ => None,
        }
    }

    /// Number of completed rounds
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Put every token back on tile 1 and forget the winner
    pub fn reset_game(&mut self) {
        let on_board = self.board.is_some();
        for player in &mut self.players {
            player.reset();
            if on_board {
                player.place_on_tile(START_TILE);
            }
        }
        self.current_player = 0;
        self.rounds_played = 0;
        self.phase = GamePhase::NotStarted;
    }

    // ==================== Play ====================

    /// Play one round: a turn for each player in order, starting with the
    /// current player. Stops early when someone wins.
    pub fn play_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        if self.is_finished() {
            return Ok(events);
        }
        self.start_if_needed(&mut events)?;

        for _ in 0..self.players.len() {
            if self.is_finished() {
                break;
            }
            self.take_turn(&mut events)?;
        }

        self.rounds_played += 1;
        Ok(events)
    }

    /// Play a single turn for the current player
    pub fn play_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        if self.is_finished() {
            return Ok(events);
        }
        self.start_if_needed(&mut events)?;
        self.take_turn(&mut events)?;
        Ok(events)
    }

    /// Pass the turn to the next player without playing. Does nothing once
    /// the game is finished.
    pub fn advance_to_next_player(&mut self) -> Option<GameEvent> {
        if self.players.is_empty() || self.is_finished() {
            return None;
        }
        let player = self.current_player as PlayerId;
        self.current_player = (self.current_player + 1) % self.players.len();
        Some(GameEvent::TurnEnded {
            player,
            next_player: self.current_player as PlayerId,
        })
    }

    /// Place a player directly on a tile. No tile action runs. Fails once
    /// the game is finished so the winner stays on the terminal tile.
    pub fn move_player_to_tile(
        &mut self,
        player: PlayerId,
        tile: TileId,
    ) -> Result<GameEvent, GameError> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        let board = self.board.as_ref().ok_or(GameError::NotReady("no board"))?;
        board.tile(tile)?;
        let p = self
            .players
            .get_mut(player as usize)
            .ok_or_else(|| GameError::InvalidPlayer(format!("no player with id {}", player)))?;

        let from = p.position();
        p.place_on_tile(tile);
        let event = GameEvent::PlayerMoved {
            player,
            from,
            to: tile,
        };

        let mut events = Vec::new();
        self.emit(&mut events, event.clone());
        Ok(event)
    }

    fn ensure_ready(&self) -> Result<(), GameError> {
        if self.board.is_none() {
            return Err(GameError::NotReady("no board"));
        }
        if self.dice.is_none() {
            return Err(GameError::NotReady("no dice"));
        }
        if self.players.is_empty() || self.players.len() < self.config.min_players {
            return Err(GameError::NotReady("not enough players"));
        }
        Ok(())
    }

    fn start_if_needed(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.ensure_ready()?;
        if self.phase != GamePhase::NotStarted {
            return Ok(());
        }

        for player in &mut self.players {
            if player.current_tile.is_none() {
                player.place_on_tile(START_TILE);
            }
        }
        self.phase = GamePhase::InProgress;
        info!(players = self.players.len(), "game started");
        self.emit(
            events,
            GameEvent::GameStarted {
                players: self.players.len(),
            },
        );
        Ok(())
    }

    fn take_turn(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let index = self.current_player;
        let player_id = index as PlayerId;

        if self.players[index].skips_next_turn {
            self.players[index].skips_next_turn = false;
            info!(player = %self.players[index].name, "skips this turn");
            self.emit(events, GameEvent::TurnSkipped { player: player_id });
            self.end_turn(events);
            return Ok(());
        }

        let DiceRoll { values, total } = self
            .dice
            .as_mut()
            .ok_or(GameError::NotReady("no dice"))?
            .roll();
        debug!(player = %self.players[index].name, ?values, total, "rolled");
        self.emit(
            events,
            GameEvent::DiceRolled {
                player: player_id,
                values,
                total,
            },
        );

        self.apply_roll(index, total, events)
    }

    /// Move a player `steps` tiles, run the landing tile's action once, then
    /// either finish the game or pass the turn on.
    fn apply_roll(
        &mut self,
        index: usize,
        steps: u32,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let board = self.board.as_ref().ok_or(GameError::NotReady("no board"))?;
        let player = &mut self.players[index];
        let final_tile = board.final_tile_id();

        let from = player.position();
        let target = from.saturating_add(steps).min(final_tile);
        let tile = board.tile(target)?;
        player.place_on_tile(target);
        debug!(player = %player.name, from, to = target, "moved");

        let mut step_events = vec![GameEvent::PlayerMoved {
            player: player.id,
            from,
            to: target,
        }];

        // Secondary relocation never triggers the destination's own action
        if let Some(action) = tile.action {
            step_events.push(action.perform(player, board)?);
        }

        let winner = player.has_won(final_tile).then_some(player.id);
        let name = player.name.clone();

        for event in step_events {
            self.emit(events, event);
        }

        match winner {
            Some(winner) => {
                self.phase = GamePhase::Finished { winner };
                info!(winner = %name, round = self.rounds_played + 1, "game over");
                self.emit(events, GameEvent::GameOver { winner });
            }
            None => self.end_turn(events),
        }
        Ok(())
    }

    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(event) = self.advance_to_next_player() {
            self.emit(events, event);
        }
    }

    // ==================== Files ====================

    /// Write the bound board to a JSON file
    pub fn save_board(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let board = self.board.as_ref().ok_or(GameError::NotReady("no board"))?;
        board_file::save_board(board, path)
    }

    /// Load and bind a board from a JSON file. The current board is kept if
    /// loading fails.
    pub fn load_board(&mut self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let board = board_file::load_board(path)?;
        self.set_board(board);
        Ok(())
    }

    /// Write the players to a roster file
    pub fn save_roster(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let entries: Vec<RosterEntry> = self.players.iter().map(RosterEntry::from).collect();
        roster::save_roster(&entries, path)
    }

    /// Replace the players with those in a roster file
    pub fn load_roster(&mut self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let entries = roster::load_roster(path)?;
        self.set_roster(&entries)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("dice", &self.dice)
            .field("players", &self.players)
            .field("current_player", &self.current_player)
            .field("phase", &self.phase)
            .field("rounds_played", &self.rounds_played)
            .field("observers", &self.observers.len())
            .finish()
    }
}
