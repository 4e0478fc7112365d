// Library exports for the candy crush agent
// This allows the replay tool and other utilities to use the core search logic

pub mod agent;
pub mod board;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod gravity;
pub mod grid;
pub mod io;
pub mod replay;
pub mod search;
pub mod types;

pub use error::{Error, Result};
