// Tests for the replay engine
//
// Decisions are produced by the agent, written through the decision logger,
// then loaded and replayed to check the search is reproducible.

use candy_crush_agent::agent::Agent;
use candy_crush_agent::board::Board;
use candy_crush_agent::config::Config;
use candy_crush_agent::debug_logger::DebugLogger;
use candy_crush_agent::replay::ReplayEngine;
use candy_crush_agent::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn quick_config() -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.time_unit_ms = 1;
    config.timing.polling_interval_ms = 1;
    config
}

async fn write_log(path: &Path, boards: &[Board]) {
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    let agent = Agent::new(quick_config());
    for board in boards {
        let decision = agent.next_move(board, 20.0).await.unwrap();
        logger.log_decision(board, &decision).await;
    }
}

fn sample_boards() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(77);
    let mut boards: Vec<Board> = (0..4).map(|_| Board::random(5, 3, &mut rng)).collect();
    boards.push(Board::empty(3));
    boards
}

#[tokio::test]
async fn test_logged_decisions_replay_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.jsonl");
    let boards = sample_boards();
    write_log(&path, &boards).await;

    let engine = ReplayEngine::new(quick_config(), true);
    let entries = engine.load_log_file(&path).unwrap();
    assert_eq!(entries.len(), boards.len());
    assert_eq!(entries[4].chosen_move, None);

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), boards.len());
    assert!(results.iter().all(|r| r.matches), "{:#?}", results);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.matches, boards.len());
    assert_eq!(stats.mismatches, 0);
    assert_eq!(stats.match_rate, 100.0);
}

#[tokio::test]
async fn test_tampered_value_is_a_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.jsonl");
    write_log(&path, &sample_boards()[..1]).await;

    let engine = ReplayEngine::new(quick_config(), false);
    let mut entries = engine.load_log_file(&path).unwrap();
    entries[0].value += 1;

    let result = engine.replay_entry(&entries[0]).unwrap();
    assert!(!result.matches);
    assert_eq!(result.replayed_value + 1, result.original_value);
}

#[test]
fn test_bad_designator_fails_replay() {
    let engine = ReplayEngine::new(quick_config(), false);
    let line = r#"{"timestamp":"t","board":["01","10"],"chosen_move":"??","value":1,"depth_limit":2,"time_per_move":0,"nodes":1}"#;
    let entry = serde_json::from_str(line).unwrap();

    assert!(matches!(
        engine.replay_entry(&entry),
        Err(Error::InvalidDesignator { .. })
    ));
    assert!(engine.replay_all(&[entry]).is_empty());
}

#[test]
fn test_malformed_log_line_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.jsonl");
    std::fs::write(&path, "{\"timestamp\": \n").unwrap();

    let engine = ReplayEngine::new(quick_config(), false);
    assert!(matches!(
        engine.load_log_file(&path),
        Err(Error::Serialization(_))
    ));
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(quick_config(), false);
    assert!(matches!(
        engine.load_log_file("no_such_log.jsonl"),
        Err(Error::Io { .. })
    ));
}
