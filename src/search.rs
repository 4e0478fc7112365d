// Adversarial search over crush moves
//
// Values are cumulative (MAX score - MIN score) along the explored line: every
// MAX move adds size², every MIN move subtracts size². Nodes are terminal when
// the board has no groups left or the depth limit is reached.
//
// A node's value only covers the moves from that node down, so the window is
// shifted by the move's signed score before it is handed to the child.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::board::Board;
use crate::gravity;
use crate::grid::{find_groups, Group};
use crate::types::{Coord, Player};

/// Stand-in for infinity; real values are bounded by N⁴ ≤ 26⁴
pub const SCORE_BOUND: i32 = 1_000_000;

/// Best move at a node and its backed-up value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` when the board offers no move
    pub best_move: Option<Coord>,
    pub value: i32,
}

impl SearchResult {
    /// Result of a node with no legal move
    pub fn no_move() -> Self {
        SearchResult {
            best_move: None,
            value: 0,
        }
    }

    fn worst_for(player: Player) -> Self {
        SearchResult {
            best_move: None,
            value: match player {
                Player::Max => -SCORE_BOUND,
                Player::Min => SCORE_BOUND,
            },
        }
    }
}

/// Counters gathered during one depth-limited search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    /// True if any line reached the depth limit before the board ran out
    pub horizon_reached: bool,
}

/// The stop flag was raised before the search finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// Candidate groups, largest first; ties keep row-major scan order
pub fn ordered_candidates(board: &Board) -> Vec<Group> {
    let mut groups = find_groups(board);
    groups.sort_by(|a, b| b.size().cmp(&a.size()));
    groups
}

/// Depth-limited alpha-beta searcher with an optional cooperative stop flag
pub struct Searcher<'a> {
    depth_limit: u32,
    stop: Option<&'a AtomicBool>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Creates a searcher that always runs to completion
    pub fn new(depth_limit: u32) -> Self {
        Searcher {
            depth_limit,
            stop: None,
            stats: SearchStats::default(),
        }
    }

    /// Creates a searcher that aborts as soon as `stop` is raised
    pub fn with_stop(depth_limit: u32, stop: &'a AtomicBool) -> Self {
        Searcher {
            depth_limit,
            stop: Some(stop),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches from the root (depth 1) with a full window
    pub fn search_root(&mut self, board: &Board, player: Player) -> Result<SearchResult, Aborted> {
        self.alpha_beta(board, player, -SCORE_BOUND, SCORE_BOUND, 1)
    }

    /// Alpha-beta over ordered candidates
    ///
    /// At the horizon only the first (largest) candidate is scored. It is also
    /// the best horizon move for either player, so siblings cannot change the value.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        player: Player,
        mut alpha: i32,
        mut beta: i32,
        depth: u32,
    ) -> Result<SearchResult, Aborted> {
        if let Some(stop) = self.stop {
            if stop.load(Ordering::Relaxed) {
                return Err(Aborted);
            }
        }
        self.stats.nodes += 1;

        let candidates = ordered_candidates(board);
        if candidates.is_empty() {
            return Ok(SearchResult::no_move());
        }

        let mut best = SearchResult::worst_for(player);

        for group in &candidates {
            let score = group.score();
            let mv = group.anchor();

            if depth >= self.depth_limit {
                self.stats.horizon_reached = true;
                return Ok(SearchResult {
                    best_move: Some(mv),
                    value: player.signed(score),
                });
            }

            let gained = player.signed(score);
            let next = gravity::apply_group(board, group);
            let child = self.alpha_beta(
                &next,
                player.opponent(),
                alpha - gained,
                beta - gained,
                depth + 1,
            )?;
            let total = child.value + gained;

            match player {
                Player::Max => {
                    if total > best.value {
                        best = SearchResult {
                            best_move: Some(mv),
                            value: total,
                        };
                    }
                    if best.value >= beta {
                        self.stats.cutoffs += 1;
                        return Ok(best);
                    }
                    alpha = alpha.max(best.value);
                }
                Player::Min => {
                    if total < best.value {
                        best = SearchResult {
                            best_move: Some(mv),
                            value: total,
                        };
                    }
                    if best.value <= alpha {
                        self.stats.cutoffs += 1;
                        return Ok(best);
                    }
                    beta = beta.min(best.value);
                }
            }
        }

        Ok(best)
    }
}

/// Runs one uninterruptible alpha-beta search from an explicit node
pub fn alpha_beta(
    board: &Board,
    player: Player,
    alpha: i32,
    beta: i32,
    depth: u32,
    depth_limit: u32,
) -> SearchResult {
    let mut searcher = Searcher::new(depth_limit);
    match searcher.alpha_beta(board, player, alpha, beta, depth) {
        Ok(result) => result,
        Err(Aborted) => unreachable!("searcher without a stop flag cannot abort"),
    }
}

/// Exhaustive minimax with the same leaf and terminal rules, without pruning
pub fn minimax(board: &Board, player: Player, depth: u32, depth_limit: u32) -> SearchResult {
    let candidates = ordered_candidates(board);
    let Some(first) = candidates.first() else {
        return SearchResult::no_move();
    };

    if depth >= depth_limit {
        return SearchResult {
            best_move: Some(first.anchor()),
            value: player.signed(first.score()),
        };
    }

    let mut best = SearchResult::worst_for(player);
    for group in &candidates {
        let next = gravity::apply_group(board, group);
        let child = minimax(&next, player.opponent(), depth + 1, depth_limit);
        let total = child.value + player.signed(group.score());
        let improves = match player {
            Player::Max => total > best.value,
            Player::Min => total < best.value,
        };
        if improves {
            best = SearchResult {
                best_move: Some(group.anchor()),
                value: total,
            };
        }
    }
    best
}
