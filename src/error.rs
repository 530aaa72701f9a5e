//! Error types shared across the engine.

use thiserror::Error;

use crate::board::{Color, Point};

/// Errors raised by the board and coordinate helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("board size {0} out of range (2..=25)")]
    BoardSize(usize),

    #[error("point {0} is not on the board")]
    OffBoard(Point),

    #[error("invalid point: '{0}'")]
    InvalidPoint(String),

    #[error("point off board: '{0}'")]
    PointOffBoard(String),

    #[error("coordinate ({row}, {col}) out of range")]
    CoordOutOfRange { row: usize, col: usize },

    #[error("occupied")]
    Occupied,

    #[error("capture")]
    Capture,

    #[error("suicide")]
    Suicide,

    #[error("{0:?} cannot play")]
    NotAStone(Color),

    #[error("bad diagram: {0}")]
    Diagram(String),
}

/// Errors raised when an engine configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("num_sim must be positive")]
    ZeroSimulations,

    #[error("ply_limit must be positive")]
    ZeroPlyLimit,

    #[error("exploration constant must be positive and finite (got {0})")]
    BadExploration(f64),

    #[error("unknown policy '{0}' (expected random or pattern)")]
    UnknownPolicy(String),

    #[error("unknown selection '{0}' (expected fixed or bandit)")]
    UnknownAllocator(String),
}

/// Errors raised while loading a pattern weight table.
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("failed to read weight table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing weight token")]
    MissingWeight { line: usize },

    #[error("line {line}: invalid weight '{token}'")]
    BadWeight { line: usize, token: String },

    #[error("line {line}: weight {weight} must be finite and non-negative")]
    NegativeWeight { line: usize, weight: f64 },

    #[error("weight table has more than 65536 entries")]
    TooManyEntries,
}
