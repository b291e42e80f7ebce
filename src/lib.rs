//! Fifteen Puzzle Solver
//!
//! Solves the generalized H×W sliding-tile puzzle with a fixed constructive
//! strategy. The solved layout numbers tiles row-major with the blank (0) in
//! the top-left cell; the solver returns the blank moves (`l`, `r`, `u`, `d`)
//! that take a solvable starting layout there.
//!
//! The strategy places tiles from the bottom-right corner backwards: rows
//! below the top two one cell at a time (column 0 with a special idiom), then
//! the top two rows a column pair at a time, then the remaining 2×2 corner.
//! It does not look for short solutions.
//!
//! ```
//! use fifteen::{MoveString, Puzzle};
//!
//! let mut puzzle: Puzzle = "8 7 6 / 5 4 3 / 2 1 0".parse()?;
//! let mut replay = puzzle.clone();
//!
//! let moves: MoveString = puzzle.solve_puzzle()?;
//! assert!(puzzle.is_solved());
//!
//! replay.apply_moves(&moves)?;
//! assert_eq!(replay, puzzle);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
mod invariants;
pub mod moves;
pub mod planner;
pub mod puzzle;
mod solver;

pub use error::{Invariant, PuzzleError, SolveError};
pub use moves::{Idiom, Move, MoveString};
pub use puzzle::{Position, Puzzle};
