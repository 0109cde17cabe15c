use std::path::PathBuf;

use thiserror::Error;

use super::state::SessionPhase;

/// Setup failures. A session is never built from a config that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid needs at least one row and one column")]
    EmptyDimension,
    #[error("{rows}x{columns} grid has an odd number of cards")]
    OddCellCount { rows: usize, columns: usize },
    #[error("grid needs {needed} distinct symbols but the pool has {available}")]
    NotEnoughSymbols { needed: usize, available: usize },
    #[error("{name} must be a non-negative number of seconds that fits a Duration, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A rejected `select`. Mis-taps are routine; none of these disturb the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("cards cannot be selected while the session is {phase}")]
    NotPlaying { phase: SessionPhase },
    #[error("card {index} is out of range (grid has {len} cards)")]
    OutOfRange { index: usize, len: usize },
    #[error("card {index} has already been matched")]
    AlreadyMatched { index: usize },
    #[error("card {index} is already face up")]
    AlreadyFaceUp { index: usize },
    #[error("card {index} is not accepting input")]
    NotInteractable { index: usize },
    #[error("a pair is still being resolved")]
    ResolutionPending,
}
