// Decision log for offline replay
//
// Each turn's input board and chosen move are appended to a JSONL file so the
// replay tool can re-run the search on exactly the same position.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::agent::Decision;
use crate::board::Board;

/// Represents a single decision log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionLogEntry {
    pub timestamp: String,
    /// Board before the move
    pub board: Board,
    /// Move designator such as `C4`; `None` when no move was available
    pub chosen_move: Option<String>,
    pub value: i32,
    pub depth_limit: u32,
    pub time_per_move: u64,
    pub nodes: u64,
}

impl DecisionLogEntry {
    pub fn new(board: &Board, decision: &Decision) -> Self {
        DecisionLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            board: board.clone(),
            chosen_move: decision.chosen.map(|c| c.designator()),
            value: decision.result.value,
            depth_limit: decision.depth_limit,
            time_per_move: decision.time_per_move,
            nodes: decision.stats.nodes,
        }
    }
}

/// Shared decision logger state
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, opens the log file for appending
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Decision logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to open decision log '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one decision; failures are logged, never propagated
    pub async fn log_decision(&self, board: &Board, decision: &Decision) {
        if !self.enabled {
            return;
        }

        let entry = DecisionLogEntry::new(board, decision);
        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize decision log entry: {}", e);
                return;
            }
        };

        let mut file_guard = self.file.lock().await;
        if let Some(file) = file_guard.as_mut() {
            let line_with_newline = format!("{}\n", json_line);
            if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                error!("Failed to write decision log entry: {}", e);
            } else if let Err(e) = file.flush().await {
                error!("Failed to flush decision log: {}", e);
            }
        }
    }
}
