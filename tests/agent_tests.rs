//! Deadline-driven agent behaviour
//!
//! These tests shrink the time unit so the deadline fires within milliseconds.

use candy_crush_agent::agent::Agent;
use candy_crush_agent::board::Board;
use candy_crush_agent::config::Config;
use candy_crush_agent::gravity;
use candy_crush_agent::grid::find_group_at;
use candy_crush_agent::io::format_output;
use candy_crush_agent::search::minimax;
use candy_crush_agent::types::{Coord, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn config_with_time_unit(time_unit_ms: u64) -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.time_unit_ms = time_unit_ms;
    config.timing.polling_interval_ms = 1;
    config
}

#[tokio::test]
async fn test_zero_budget_returns_warm_up_result() {
    let mut rng = StdRng::seed_from_u64(314);
    let board = Board::random(8, 3, &mut rng);
    let agent = Agent::new(config_with_time_unit(0));

    let decision = agent.next_move(&board, 50.0).await.unwrap();
    let standalone = agent.search_to_depth(&board, 2);

    assert_eq!(decision.depth_limit, 2);
    assert_eq!(decision.result, standalone.result);

    let mv = standalone.result.best_move.unwrap();
    let group = find_group_at(&board, mv).unwrap();
    assert_eq!(decision.board_after, gravity::apply_group(&board, &group));
}

#[tokio::test]
async fn test_small_board_is_searched_to_the_end() {
    let mut rng = StdRng::seed_from_u64(2718);
    for _ in 0..5 {
        let board = Board::random(3, 2, &mut rng);
        let agent = Agent::new(config_with_time_unit(1000));

        let decision = agent.next_move(&board, 1000.0).await.unwrap();

        assert!(!decision.stats.horizon_reached, "board:\n{}", board);
        assert_eq!(
            decision.result.value,
            minimax(&board, Player::Max, 1, 64).value,
            "board:\n{}",
            board
        );
    }
}

#[tokio::test]
async fn test_deadline_preempts_deep_search() {
    let mut rng = StdRng::seed_from_u64(1618);
    let board = Board::random(20, 4, &mut rng);
    // One grace unit of 50ms and no per-move share
    let agent = Agent::new(config_with_time_unit(50));

    let started = Instant::now();
    let decision = agent.next_move(&board, 0.0).await.unwrap();
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_secs(5),
        "deadline was not honoured: {:?}",
        elapsed
    );
    assert!(decision.depth_limit >= 2);

    let mv = decision.chosen.expect("full board has a move");
    let group = find_group_at(&board, mv).unwrap();
    assert_eq!(decision.board_after, gravity::apply_group(&board, &group));
    assert_eq!(decision.time_per_move, 0);
}

#[tokio::test]
async fn test_cleared_board_reports_no_move() {
    let board = Board::empty(4);
    let agent = Agent::new(Config::default_hardcoded());

    let decision = agent.next_move(&board, 10.0).await.unwrap();

    assert_eq!(decision.chosen, None);
    assert_eq!(decision.result.value, 0);
    assert_eq!(decision.board_after, board);
}

#[tokio::test]
async fn test_single_group_board_output() {
    let board = Board::from_rows(&["11", "11"]).unwrap();
    let agent = Agent::new(Config::default_hardcoded());

    let decision = agent.next_move(&board, 10.0).await.unwrap();

    assert_eq!(decision.chosen, Some(Coord::new(0, 0)));
    assert_eq!(decision.result.value, 16);
    assert_eq!(decision.time_per_move, 10);
    assert_eq!(format_output(&decision), "A1\n**\n**\n");
}

#[tokio::test]
async fn test_time_per_move_is_amortized_over_groups() {
    // Four singleton groups
    let board = Board::from_rows(&["01", "10"]).unwrap();
    let agent = Agent::new(config_with_time_unit(1));

    let decision = agent.next_move(&board, 9.0).await.unwrap();
    assert_eq!(decision.time_per_move, 2);
}

#[tokio::test]
async fn test_full_turn_from_input_file_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output.txt");
    std::fs::write(&input_path, "3\n2\n6\n001\n011\n111\n").unwrap();

    let input = candy_crush_agent::io::read_input(&input_path).unwrap();
    let agent = Agent::new(config_with_time_unit(1));
    let decision = agent.next_move(&input.board, input.time_left).await.unwrap();
    candy_crush_agent::io::write_output(&output_path, &decision).unwrap();

    // Crushing the six 1s first is worth 36 and leaves a single 0 group
    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, "C1\n***\n0**\n00*\n");
    assert_eq!(decision.result.value, 36 - 9);
}
