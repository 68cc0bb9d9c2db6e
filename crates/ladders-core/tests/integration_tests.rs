//! Integration tests for the Ladders game engine.
//!
//! These tests verify complete game flows from setup through to victory,
//! including board and roster files on disk.

use ladders_core::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn standard_game(seed: u64) -> GameEngine {
    let mut game = GameEngine::new();
    game.create_board(BoardSpec::Preset(BoardPreset::Standard))
        .unwrap();
    game.create_seeded_dice(2, seed).unwrap();
    game.add_player("Alice", Token::TopHat).unwrap();
    game.add_player("Bob", Token::RaceCar).unwrap();
    game.add_player("Carol", Token::Shoe).unwrap();
    game
}

/// Play rounds until the game ends, collecting every event
fn play_to_end(game: &mut GameEngine, max_rounds: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut rounds = 0;
    while !game.is_finished() && rounds < max_rounds {
        events.extend(game.play_round().unwrap());
        rounds += 1;
    }
    assert!(
        game.is_finished(),
        "Game should finish within {} rounds",
        max_rounds
    );
    events
}

#[test]
fn test_full_game_standard_board() {
    let mut game = standard_game(2024);
    let events = play_to_end(&mut game, 1000);

    let winner = game.winner().unwrap();
    assert_eq!(winner.current_tile, Some(100));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver { winner: winner.id })
    );

    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    // Nobody ever stands beyond the last tile
    for event in &events {
        if let GameEvent::PlayerMoved { to, .. } = event {
            assert!(*to <= 100);
        }
    }
}

#[test]
fn test_ladders_and_chutes_follow_board() {
    let mut game = standard_game(11);
    let events = play_to_end(&mut game, 1000);
    let board = game.board().unwrap();

    for event in &events {
        match event {
            GameEvent::LadderClimbed { from, to, .. } => {
                assert!(to > from);
                assert_eq!(board.get_tile(*from).unwrap().action, Some(TileAction::ladder(*to)));
            }
            GameEvent::ChuteSlid { from, to, .. } => {
                assert!(to < from);
                assert_eq!(board.get_tile(*from).unwrap().action, Some(TileAction::ladder(*to)));
            }
            _ => {}
        }
    }
}

#[test]
fn test_seeded_games_replay() {
    let mut a = standard_game(77);
    let mut b = standard_game(77);
    assert_eq!(play_to_end(&mut a, 1000), play_to_end(&mut b, 1000));
    assert_eq!(a.winner().map(|p| p.id), b.winner().map(|p| p.id));
}

#[test]
fn test_single_player_game() {
    let mut game = GameEngine::new();
    game.create_board(BoardSpec::Generated { rows: 4, cols: 4 })
        .unwrap();
    game.create_seeded_dice(1, 5).unwrap();
    game.add_player("Solo", Token::Thimble).unwrap();

    play_to_end(&mut game, 100);
    assert_eq!(game.winner().unwrap().name, "Solo");
    assert_eq!(game.winner().unwrap().current_tile, Some(16));
}

#[test]
fn test_board_file_round_trip() {
    let dir = temp_dir();
    let path = dir.path().join("board.json");
    let game = standard_game(1);
    game.save_board(&path).unwrap();

    let mut other = GameEngine::new();
    other.load_board(&path).unwrap();
    assert_eq!(other.board(), game.board());
}

#[test]
fn test_invalid_board_file_keeps_current_board() {
    let dir = temp_dir();
    let path = dir.path().join("bad-board.json");
    std::fs::write(&path, r#"{"rows": 2, "tiles": []}"#).unwrap();

    let mut game = standard_game(1);
    let err = game.load_board(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(game.board().unwrap().final_tile_id(), 100);
}

#[test]
fn test_missing_board_file() {
    let dir = temp_dir();
    let path = dir.path().join("missing-board.json");
    let mut game = GameEngine::new();
    assert!(matches!(
        game.load_board(&path),
        Err(GameError::Io { .. })
    ));
    assert!(game.board().is_none());
}

#[test]
fn test_roster_round_trip() {
    let dir = temp_dir();
    let path = dir.path().join("players.csv");
    let game = standard_game(1);
    game.save_roster(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "PlayerName,PlayerToken\nAlice,TopHat\nBob,RaceCar\nCarol,Shoe\n"
    );

    let mut other = GameEngine::new();
    other.create_board(BoardSpec::Generated { rows: 5, cols: 5 })
        .unwrap();
    other.load_roster(&path).unwrap();
    let names: Vec<&str> = other.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert!(other.players().iter().all(|p| p.current_tile == Some(1)));
}

#[test]
fn test_roster_two_rows() {
    let dir = temp_dir();
    let path = dir.path().join("two.csv");
    std::fs::write(&path, "PlayerName,PlayerToken\nAlice,TopHat\nBob,RaceCar\n").unwrap();

    let mut game = GameEngine::new();
    game.load_roster(&path).unwrap();
    assert_eq!(game.players().len(), 2);
    assert_eq!(game.players()[0].token, Token::TopHat);
    assert_eq!(game.players()[1].token, Token::RaceCar);
}

#[test]
fn test_roster_duplicate_token_rejected() {
    let dir = temp_dir();
    let path = dir.path().join("dup.csv");
    std::fs::write(&path, "PlayerName,PlayerToken\nAlice,TopHat\nBob,TopHat\n").unwrap();

    let mut game = GameEngine::new();
    let err = game.load_roster(&path).unwrap_err();
    assert!(matches!(err, GameError::DuplicateToken(Token::TopHat)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(game.players().is_empty());
}

#[test]
fn test_roster_header_only_rejected() {
    let dir = temp_dir();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "PlayerName,PlayerToken\n").unwrap();

    let mut game = GameEngine::new();
    assert!(matches!(
        game.load_roster(&path),
        Err(GameError::EmptyRoster)
    ));
}

#[test]
fn test_save_roster_rejects_bad_names_without_writing() {
    let dir = temp_dir();
    let path = dir.path().join("unsaved.csv");
    let entries = vec![RosterEntry::new("Smith, Jo", Token::Cat)];
    assert!(save_roster(&entries, &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_config_drives_engine() {
    let config = GameConfig::from_json(r#"{"max_players": 2, "seed": 9}"#).unwrap();
    let mut game = GameEngine::with_config(config).unwrap();
    assert_eq!(game.config().max_players, 2);
    assert_eq!(game.config().seed, Some(9));
    game.create_board(BoardSpec::Preset(BoardPreset::Small))
        .unwrap();
    game.create_dice(1).unwrap();
    game.add_player("A", Token::Cat).unwrap();
    game.add_player("B", Token::Shoe).unwrap();
    assert!(matches!(
        game.add_player("C", Token::Thimble),
        Err(GameError::TooManyPlayers { max: 2 })
    ));

    let mut replay = GameEngine::new();
    replay.create_board(BoardSpec::Preset(BoardPreset::Small))
        .unwrap();
    replay.create_seeded_dice(1, 9).unwrap();
    replay.add_player("A", Token::Cat).unwrap();
    replay.add_player("B", Token::Shoe).unwrap();

    assert_eq!(game.play_round().unwrap(), replay.play_round().unwrap());
}
