// Replay module for checking logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Re-run the search on each logged board at the logged depth
// 3. Compare logged vs replayed moves and values
// 4. Generate summary reports

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::agent::Agent;
use crate::config::Config;
use crate::debug_logger::DecisionLogEntry;
use crate::error::{Error, Result};
use crate::types::Coord;

/// Result of replaying a single decision
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub timestamp: String,
    pub original_move: Option<Coord>,
    pub replayed_move: Option<Coord>,
    pub original_value: i32,
    pub replayed_value: i32,
    pub matches: bool,
    pub depth_limit: u32,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    agent: Agent,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            agent: Agent::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionLogEntry>> {
        let log_path = log_path.as_ref();
        let file = File::open(log_path)
            .map_err(|e| Error::io(format!("open log file {}", log_path.display()), e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(format!("read line {}", line_num + 1), e))?;

            if line.trim().is_empty() {
                continue;
            }

            entries.push(serde_json::from_str(&line)?);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DecisionLogEntry) -> Result<ReplayResult> {
        let original_move = entry
            .chosen_move
            .as_deref()
            .map(Self::parse_designator)
            .transpose()?;

        let start_time = Instant::now();
        let iteration = self
            .agent
            .search_to_depth(&entry.board, entry.depth_limit);
        let computation_time_ms = start_time.elapsed().as_millis();

        let replayed_move = iteration.result.best_move;
        let replayed_value = iteration.result.value;
        let matches = original_move == replayed_move && entry.value == replayed_value;

        let result = ReplayResult {
            timestamp: entry.timestamp.clone(),
            original_move,
            replayed_move,
            original_value: entry.value,
            replayed_value,
            matches,
            depth_limit: entry.depth_limit,
            computation_time_ms,
        };

        if self.verbose {
            if matches {
                info!(
                    "{}: MATCH - {} (value: {}, depth: {}, time: {}ms)",
                    result.timestamp,
                    Self::describe(replayed_move),
                    replayed_value,
                    result.depth_limit,
                    computation_time_ms
                );
            } else {
                warn!(
                    "{}: MISMATCH - Original: {} ({}), Replayed: {} ({}) at depth {}",
                    result.timestamp,
                    Self::describe(original_move),
                    entry.value,
                    Self::describe(replayed_move),
                    replayed_value,
                    result.depth_limit
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in parallel, skipping entries that fail to replay
    pub fn replay_all(&self, entries: &[DecisionLogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay decision at {}: {}", entry.timestamp, e);
                    None
                }
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_depth: f64 =
                results.iter().map(|r| r.depth_limit as f64).sum::<f64>() / results.len() as f64;

            println!("Average Search Depth:       {:.1}", avg_depth);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "{}: {} ({}) → {} ({}) at depth {}",
                    result.timestamp,
                    Self::describe(result.original_move),
                    result.original_value,
                    Self::describe(result.replayed_move),
                    result.replayed_value,
                    result.depth_limit
                );
            }
            println!();
        }
    }

    fn describe(mv: Option<Coord>) -> String {
        mv.map(|c| c.designator())
            .unwrap_or_else(|| "none".to_string())
    }

    /// Helper to parse a move designator
    fn parse_designator(s: &str) -> Result<Coord> {
        Coord::from_designator(s).ok_or_else(|| Error::InvalidDesignator {
            value: s.to_string(),
        })
    }
}
