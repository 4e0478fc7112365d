// Turn orchestration: iterative deepening under a deadline
//
// A shallow warm-up iteration always completes first, so a usable move exists
// before the deadline is armed. Deeper iterations then run on the blocking
// pool while an async poller watches the clock; when time is up the poller
// raises the stop flag and takes the last fully completed iteration.

use log::{debug, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::gravity;
use crate::grid;
use crate::search::{Aborted, SearchResult, SearchStats, Searcher};
use crate::types::{Coord, Player};

/// One depth iteration that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedIteration {
    pub depth_limit: u32,
    pub result: SearchResult,
    pub stats: SearchStats,
}

/// State shared between the deepening worker and the deadline poller
///
/// The latest completed iteration sits behind a mutex so a reader never sees
/// a move from one iteration paired with the value of another.
#[derive(Debug, Default)]
pub struct SharedSearchState {
    latest: Mutex<Option<CompletedIteration>>,
    stop: AtomicBool,
    search_complete: AtomicBool,
    current_depth: AtomicU32,
}

impl SharedSearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the latest completed iteration
    pub fn publish(&self, iteration: CompletedIteration) {
        *self.latest.lock() = Some(iteration);
    }

    pub fn latest(&self) -> Option<CompletedIteration> {
        *self.latest.lock()
    }

    /// Asks the worker to abandon its current iteration. Irreversible.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_complete(&self) -> bool {
        self.search_complete.load(Ordering::Acquire)
    }

    /// Depth limit of the iteration currently running (or last run)
    pub fn current_depth(&self) -> u32 {
        self.current_depth.load(Ordering::Acquire)
    }
}

/// The agent's answer for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Selected cell, or `None` when the board has no move
    pub chosen: Option<Coord>,
    pub result: SearchResult,
    /// Depth limit of the iteration the move came from
    pub depth_limit: u32,
    pub time_per_move: u64,
    /// Board after the chosen group is crushed and settled
    pub board_after: Board,
    pub stats: SearchStats,
}

impl Decision {
    fn no_move(board: &Board, time_per_move: u64) -> Self {
        Decision {
            chosen: None,
            result: SearchResult::no_move(),
            depth_limit: 0,
            time_per_move,
            board_after: board.clone(),
            stats: SearchStats::default(),
        }
    }
}

fn describe_move(mv: Option<Coord>) -> String {
    mv.map(|c| c.designator())
        .unwrap_or_else(|| "none".to_string())
}

/// Time-bounded game agent playing as MAX
pub struct Agent {
    config: Config,
}

impl Agent {
    /// Creates a new Agent with the given configuration
    pub fn new(config: Config) -> Self {
        Agent { config }
    }

    /// Runs a single uninterruptible search at a fixed depth limit
    pub fn search_to_depth(&self, board: &Board, depth_limit: u32) -> CompletedIteration {
        let mut searcher = Searcher::new(depth_limit);
        let result = match searcher.search_root(board, Player::Max) {
            Ok(result) => result,
            Err(Aborted) => unreachable!("searcher without a stop flag cannot abort"),
        };
        CompletedIteration {
            depth_limit,
            result,
            stats: searcher.stats(),
        }
    }

    /// Chooses a move for MAX within the time budget and applies it
    ///
    /// The budget per move is `time_left / legal_moves` units, plus the
    /// configured grace, counted from the end of the warm-up iteration.
    pub async fn next_move(&self, board: &Board, time_left: f64) -> Result<Decision> {
        let start_time = Instant::now();
        let timing = &self.config.timing;

        let legal_moves = grid::count_moves(board);
        if legal_moves == 0 {
            info!("No legal moves available");
            return Ok(Decision::no_move(board, 0));
        }

        let time_per_move = timing.time_per_move(time_left, legal_moves);
        info!(
            "Computing move: {} legal moves, {} time units left, {} per move",
            legal_moves, time_left, time_per_move
        );

        let shared = Arc::new(SharedSearchState::new());

        let warm_up = self.search_to_depth(board, timing.initial_depth);
        Self::log_iteration(&warm_up, start_time);
        shared.publish(warm_up);

        let budget = timing.deadline(time_per_move);
        let armed_at = Instant::now();
        debug!("Deadline armed: {}ms", budget.as_millis());

        if !warm_up.stats.horizon_reached {
            info!("Warm-up iteration exhausted the board, skipping deepening");
        } else if budget.is_zero() || timing.max_search_depth <= timing.initial_depth {
            info!("No budget for deeper iterations");
        } else {
            let worker_shared = shared.clone();
            let worker_board = board.clone();
            let first_depth = timing.initial_depth + 1;
            let max_depth = timing.max_search_depth;

            // Not awaited: the worker notices the stop flag at its next node
            let _worker = tokio::task::spawn_blocking(move || {
                Agent::deepen(&worker_board, &worker_shared, first_depth, max_depth)
            });

            let polling_interval = Duration::from_millis(timing.polling_interval_ms.max(1));
            loop {
                let elapsed = armed_at.elapsed();
                if elapsed >= budget || shared.is_complete() {
                    break;
                }
                tokio::time::sleep(polling_interval.min(budget - elapsed)).await;
            }

            shared.request_stop();
        }

        let completed = shared.latest().ok_or(Error::NoCompletedIteration)?;
        let decision = Self::finalize(board, completed, time_per_move)?;

        info!(
            "Chose {} (value: {}, depth: {}, deepest attempt: {}, time: {}ms)",
            describe_move(decision.chosen),
            decision.result.value,
            decision.depth_limit,
            shared.current_depth().max(timing.initial_depth),
            start_time.elapsed().as_millis()
        );

        Ok(decision)
    }

    /// Iterative deepening worker; runs on the blocking pool
    ///
    /// Publishes each completed iteration and stops once an iteration no longer
    /// touches its horizon, because deeper limits would explore the same tree.
    fn deepen(board: &Board, shared: &SharedSearchState, first_depth: u32, max_depth: u32) {
        let started = Instant::now();

        for depth_limit in first_depth..=max_depth {
            shared.current_depth.store(depth_limit, Ordering::Release);

            let mut searcher = Searcher::with_stop(depth_limit, &shared.stop);
            match searcher.search_root(board, Player::Max) {
                Ok(result) => {
                    let iteration = CompletedIteration {
                        depth_limit,
                        result,
                        stats: searcher.stats(),
                    };
                    Self::log_iteration(&iteration, started);
                    shared.publish(iteration);

                    if !iteration.stats.horizon_reached {
                        info!("Search tree exhausted at depth {}", depth_limit);
                        break;
                    }
                }
                Err(Aborted) => {
                    debug!("Iteration at depth {} interrupted by deadline", depth_limit);
                    return;
                }
            }
        }

        shared.search_complete.store(true, Ordering::Release);
    }

    /// Applies the iteration's move to the real board
    fn finalize(
        board: &Board,
        iteration: CompletedIteration,
        time_per_move: u64,
    ) -> Result<Decision> {
        let Some(mv) = iteration.result.best_move else {
            return Ok(Decision::no_move(board, time_per_move));
        };

        let group = grid::find_group_at(board, mv).ok_or(Error::InvalidMove {
            row: mv.row,
            col: mv.col,
        })?;

        Ok(Decision {
            chosen: Some(mv),
            result: iteration.result,
            depth_limit: iteration.depth_limit,
            time_per_move,
            board_after: gravity::apply_group(board, &group),
            stats: iteration.stats,
        })
    }

    fn log_iteration(iteration: &CompletedIteration, since: Instant) {
        info!(
            "Depth {} complete: move {}, value {}, nodes {}, cutoffs {}, {}ms",
            iteration.depth_limit,
            describe_move(iteration.result.best_move),
            iteration.result.value,
            iteration.stats.nodes,
            iteration.stats.cutoffs,
            since.elapsed().as_millis()
        );
    }
}
