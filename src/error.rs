//! Error types for puzzle construction and solving.

use thiserror::Error;

use crate::moves::Move;

/// Rejected input: a malformed layout or move string.
///
/// These are raised eagerly by the constructors and parsers, never mid-solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle must be at least 2x2, got {height}x{width}")]
    TooSmall { height: usize, width: usize },

    #[error("layout has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile {value} is out of range for a puzzle with {cells} cells")]
    ValueOutOfRange { value: u32, cells: usize },

    #[error("tile {0} appears more than once")]
    DuplicateValue(u32),

    #[error("invalid move '{0}', expected one of l, r, u, d")]
    InvalidMove(char),

    #[error("invalid tile number '{0}'")]
    InvalidNumber(String),
}

/// Which positional contract a solving phase found broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    LowerRow,
    RowZero,
    RowOne,
    Solved,
}

impl std::fmt::Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match *self {
            Invariant::LowerRow => "lower-row",
            Invariant::RowZero => "row-0",
            Invariant::RowOne => "row-1",
            Invariant::Solved => "solved",
        };
        write!(f, "{}", s)
    }
}

/// Internal-consistency fault raised while solving.
///
/// Input is validated at construction, so any of these means the solving
/// pipeline itself went wrong (or the caller handed over an unsolvable
/// permutation). Each variant carries a rendering of the grid at the moment
/// of failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("move {mv} would leave the grid with the blank at ({row}, {col})\n{grid}")]
    OffGrid {
        mv: Move,
        row: usize,
        col: usize,
        grid: String,
    },

    #[error("{phase}: {invariant} invariant does not hold at ({row}, {col})\n{grid}")]
    InvariantViolated {
        phase: &'static str,
        invariant: Invariant,
        row: usize,
        col: usize,
        grid: String,
    },

    #[error("tile {value} is not on the grid\n{grid}")]
    TileMissing { value: u32, grid: String },

    #[error("2x2 corner still unsolved after {attempts} attempts\n{grid}")]
    CornerUnsettled { attempts: usize, grid: String },
}
