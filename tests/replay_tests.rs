// Integration tests for the decision log and replay engine
//
// Decisions are pure functions of the snapshot and scoring config, so
// replaying a freshly written log must reproduce every move.

use flood_snake::bot::choose_move;
use flood_snake::config::{Config, ScoringConfig};
use flood_snake::debug_logger::DebugLogger;
use flood_snake::replay::ReplayEngine;
use flood_snake::types::{Battlesnake, Board, Coord, Direction, Game, GameState, Ruleset};
use std::path::PathBuf;

fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

fn snake(id: &str, health: i32, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: None,
        shout: None,
    }
}

fn state(turn: i32, head: Coord, food: Vec<Coord>) -> GameState {
    let me = snake("me", 40, vec![head, c(head.x, head.y - 1), c(head.x, head.y - 2)]);
    let board = Board {
        width: 11,
        height: 11,
        food,
        hazards: vec![],
        snakes: vec![me.clone(), snake("other", 90, vec![c(9, 9), c(9, 8), c(9, 7)])],
    };
    GameState {
        game: Game {
            id: "replay-game".to_string(),
            ruleset: Ruleset {
                name: "standard".to_string(),
                ..Ruleset::default()
            },
            timeout: 500,
        },
        turn,
        board,
        you: me,
    }
}

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flood_snake_{}_{}.jsonl", name, std::process::id()))
}

async fn write_log(path: &PathBuf, states: &[GameState]) {
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    let scoring = ScoringConfig::default();
    for state in states {
        let decision = choose_move(state, &scoring, false);
        logger.log_move_now(state, &decision, scoring.version).await;
    }
}

fn sample_states() -> Vec<GameState> {
    vec![
        state(1, c(5, 5), vec![c(1, 5)]),
        state(2, c(2, 2), vec![c(2, 8)]),
        state(3, c(0, 5), vec![]),
        state(4, c(8, 2), vec![c(10, 2), c(0, 0)]),
    ]
}

#[tokio::test]
async fn test_replay_reproduces_logged_moves() {
    let path = temp_log("reproduce");
    write_log(&path, &sample_states()).await;

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let entries = engine.load_log_file(&path).unwrap();
    assert_eq!(entries.len(), 4);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 4);
    assert_eq!(stats.mismatches, 0);
    assert!(results.iter().all(|r| (r.original_score - r.replayed_score).abs() < 1e-12));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_log_entries_carry_candidate_breakdowns() {
    let path = temp_log("breakdowns");
    write_log(&path, &sample_states()[..1]).await;

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let entries = engine.load_log_file(&path).unwrap();
    let candidates = entries[0].candidates.as_array().unwrap();

    assert_eq!(candidates.len(), 4);
    assert_eq!(entries[0].chosen_move, candidates[0]["direction"].as_str().unwrap());
    assert_eq!(entries[0].scoring_version, 1);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_replay_specific_turns_and_validation() {
    let path = temp_log("turns");
    let states = sample_states();
    write_log(&path, &states).await;

    let engine = ReplayEngine::new(Config::default_hardcoded(), true);
    let entries = engine.load_log_file(&path).unwrap();

    let results = engine.replay_turns(&entries, &[2, 4]).unwrap();
    assert_eq!(results.iter().map(|r| r.turn).collect::<Vec<_>>(), vec![2, 4]);
    assert!(engine.replay_turns(&entries, &[99]).is_err());

    let logged = Direction::parse(&entries[0].chosen_move).unwrap();
    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![logged])])
        .is_ok());
    let other: Vec<Direction> = Direction::all().iter().copied().filter(|d| *d != logged).collect();
    assert!(engine
        .validate_expected_moves(&entries, &[(1, other)])
        .is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_replay_flags_changed_scoring() {
    // Without food weight a hungry snake no longer chases food, so the move changes
    let hungry = state(1, c(5, 5), vec![c(1, 5)]);
    let mut starving = hungry.clone();
    starving.you.health = 2;
    starving.board.snakes[0].health = 2;

    let original = choose_move(&starving, &ScoringConfig::default(), false);
    assert_eq!(original.direction, Direction::Left);

    let mut config = Config::default_hardcoded();
    config.scoring.version = 2;
    config.scoring.food_weight = 0.0;
    let engine = ReplayEngine::new(config, false);
    let (replayed, _) = engine.replay_turn(&starving);

    assert_eq!(replayed.direction, Direction::Right);
}
