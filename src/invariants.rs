//! Positional contracts that bind the solving phases together.
//!
//! Each phase checks one of these on entry and establishes the next one on
//! exit. They only read the grid.

use crate::puzzle::Puzzle;

impl Puzzle {
    /// Blank at `(row, col)`, every row below `row` solved, and the cells of
    /// `row` right of `col` solved.
    pub fn lower_row_invariant(&self, row: usize, col: usize) -> bool {
        if self.blank() != (row, col) {
            return false;
        }
        let below_solved =
            (row + 1..self.height()).all(|r| (0..self.width()).all(|c| self.is_home(r, c)));
        below_solved && (col + 1..self.width()).all(|c| self.is_home(row, c))
    }

    /// Blank at `(0, col)` during the two-row phase: row 0 solved right of
    /// `col`, row 1 solved from `col` rightwards, every lower row solved.
    pub fn row0_invariant(&self, col: usize) -> bool {
        if self.blank() != (0, col) {
            return false;
        }
        (col + 1..self.width()).all(|c| self.is_home(0, c))
            && (col..self.width()).all(|c| self.is_home(1, c))
            && (2..self.height()).all(|r| (0..self.width()).all(|c| self.is_home(r, c)))
    }

    /// Blank at `(1, col)` during the two-row phase: the lower-row
    /// invariant at `(1, col)` plus row 0 solved right of `col`.
    pub fn row1_invariant(&self, col: usize) -> bool {
        self.lower_row_invariant(1, col) && (col + 1..self.width()).all(|c| self.is_home(0, c))
    }

    /// Only the top-left 2×2 block is left, with the blank at `(1, 1)`.
    pub fn corner_ready(&self) -> bool {
        self.lower_row_invariant(1, 1)
    }
}
