// Configuration module for reading Agent.toml

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub io: IoConfig,
    pub debug: DebugConfig,
}

/// Search depth and deadline constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Depth limit of the warm-up iteration that always completes
    pub initial_depth: u32,
    /// Safety cap for iterative deepening
    pub max_search_depth: u32,
    pub polling_interval_ms: u64,
    /// Milliseconds per unit of the input time budget
    pub time_unit_ms: u64,
    /// Extra units added to the per-move budget before the deadline fires
    pub deadline_grace_units: u64,
}

impl TimingConfig {
    /// Per-move budget: the remaining time amortized over the legal moves on the board
    pub fn time_per_move(&self, time_left: f64, legal_moves: usize) -> u64 {
        if legal_moves == 0 || !time_left.is_finite() || time_left <= 0.0 {
            return 0;
        }
        (time_left / legal_moves as f64).floor() as u64
    }

    /// Wall-clock deadline measured from the end of the warm-up iteration
    pub fn deadline(&self, time_per_move: u64) -> Duration {
        let units = time_per_move.saturating_add(self.deadline_grace_units);
        Duration::from_millis(units.saturating_mul(self.time_unit_ms))
    }
}

/// Input and output file locations
#[derive(Debug, Deserialize, Clone)]
pub struct IoConfig {
    pub input_path: String,
    pub output_path: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config file {}", path.display()), e))?;

        Ok(toml::from_str(&contents)?)
    }

    /// Loads default configuration from Agent.toml in the working directory
    pub fn load_default() -> Result<Self> {
        Self::from_file("Agent.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                initial_depth: 2,
                max_search_depth: 64,
                polling_interval_ms: 5,
                time_unit_ms: 1000,
                deadline_grace_units: 1,
            },
            io: IoConfig {
                input_path: "input.txt".to_string(),
                output_path: "output.txt".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "candy_crush_decisions.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Agent.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_per_move_uses_integer_division() {
        let timing = Config::default_hardcoded().timing;
        assert_eq!(timing.time_per_move(100.0, 7), 14);
        assert_eq!(timing.time_per_move(10.5, 2), 5);
        assert_eq!(timing.time_per_move(3.0, 4), 0);
    }

    #[test]
    fn test_time_per_move_degenerate_inputs() {
        let timing = Config::default_hardcoded().timing;
        assert_eq!(timing.time_per_move(100.0, 0), 0);
        assert_eq!(timing.time_per_move(-5.0, 3), 0);
        assert_eq!(timing.time_per_move(f64::NAN, 3), 0);
    }

    #[test]
    fn test_deadline_adds_grace_unit() {
        let timing = Config::default_hardcoded().timing;
        assert_eq!(timing.deadline(4), Duration::from_secs(5));
        assert_eq!(timing.deadline(0), Duration::from_secs(1));
    }

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.timing.initial_depth, 2);
        assert!(config.timing.max_search_depth > config.timing.initial_depth);
    }

    #[test]
    fn test_agent_toml_can_be_parsed() {
        let result = Config::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/Agent.toml"));
        assert!(
            result.is_ok(),
            "Failed to parse Agent.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_agent_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/Agent.toml"))
            .expect("Agent.toml should be parseable");
        let hardcoded = Config::default_hardcoded();

        assert_eq!(file_config.timing.initial_depth, hardcoded.timing.initial_depth);
        assert_eq!(
            file_config.timing.max_search_depth,
            hardcoded.timing.max_search_depth
        );
        assert_eq!(file_config.timing.time_unit_ms, hardcoded.timing.time_unit_ms);
        assert_eq!(
            file_config.timing.deadline_grace_units,
            hardcoded.timing.deadline_grace_units
        );
        assert_eq!(file_config.io.input_path, hardcoded.io.input_path);
        assert_eq!(file_config.io.output_path, hardcoded.io.output_path);
        assert_eq!(file_config.debug.enabled, hardcoded.debug.enabled);
    }

    #[test]
    fn test_missing_file_returns_error() {
        assert!(matches!(
            Config::from_file("nonexistent.toml"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[timing]\ninitial_depth = \"two\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::ConfigParse(_))
        ));
    }
}
