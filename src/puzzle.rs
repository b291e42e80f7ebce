use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, SolveError};
use crate::moves::{Move, MoveString};

/// A `(row, col)` cell coordinate, 0-indexed from the top-left corner.
pub type Position = (usize, usize);

/// An H×W sliding-tile board with a single blank (0).
///
/// Solved means `value == row * width + col` everywhere, which puts the blank
/// in the top-left cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    height: usize,
    width: usize,
    board: Vec<Vec<u32>>,
    blank: Position,
}

impl Puzzle {
    /// Creates the solved identity layout.
    pub fn new(height: usize, width: usize) -> Result<Self, PuzzleError> {
        check_size(height, width)?;

        let board = (0..height)
            .map(|row| (0..width).map(|col| (row * width + col) as u32).collect())
            .collect();

        Ok(Self {
            height,
            width,
            board,
            blank: (0, 0),
        })
    }

    /// Creates a puzzle from a row-major layout, rejecting anything that is
    /// not an H×W permutation of `0..H*W`.
    pub fn from_layout(
        height: usize,
        width: usize,
        layout: &[Vec<u32>],
    ) -> Result<Self, PuzzleError> {
        check_size(height, width)?;
        if layout.len() != height {
            return Err(PuzzleError::RowCount {
                expected: height,
                found: layout.len(),
            });
        }

        let cells = height * width;
        let mut seen = HashSet::with_capacity(cells);
        let mut blank = None;

        for (row, values) in layout.iter().enumerate() {
            if values.len() != width {
                return Err(PuzzleError::RowLength {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value as usize >= cells {
                    return Err(PuzzleError::ValueOutOfRange { value, cells });
                }
                if !seen.insert(value) {
                    return Err(PuzzleError::DuplicateValue(value));
                }
                if value == 0 {
                    blank = Some((row, col));
                }
            }
        }

        // every value is distinct and in range, so all of 0..cells are present
        let blank = blank.ok_or(PuzzleError::ValueOutOfRange { value: 0, cells })?;

        Ok(Self {
            height,
            width,
            board: layout.to_vec(),
            blank,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.board
    }

    /// Current position of the blank.
    pub fn blank(&self) -> Position {
        self.blank
    }

    /// Panics if `(row, col)` is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.board[row][col]
    }

    /// Overwrites one cell. Keeping the board a permutation is up to the caller.
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.board[row][col] = value;
        if value == 0 {
            self.blank = (row, col);
        }
    }

    /// Value that belongs at `(row, col)` once solved.
    pub fn solved_value(&self, row: usize, col: usize) -> u32 {
        (row * self.width + col) as u32
    }

    /// Whether `(row, col)` already holds its solved value.
    pub fn is_home(&self, row: usize, col: usize) -> bool {
        self.board[row][col] == self.solved_value(row, col)
    }

    /// Scans the grid for `value`.
    pub fn locate(&self, value: u32) -> Option<Position> {
        self.board.iter().enumerate().find_map(|(row, values)| {
            values
                .iter()
                .position(|&v| v == value)
                .map(|col| (row, col))
        })
    }

    /// Current position of the tile that belongs at `(row, col)`.
    pub(crate) fn locate_home_tile(&self, row: usize, col: usize) -> Result<Position, SolveError> {
        let value = self.solved_value(row, col);
        self.locate(value).ok_or_else(|| SolveError::TileMissing {
            value,
            grid: self.to_string(),
        })
    }

    /// Swaps the blank with its neighbour in `movement`'s direction.
    ///
    /// Returns false, leaving the grid untouched, when that would leave the grid.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.blank;

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;

        if new_row >= 0
            && new_row < self.height as isize
            && new_col >= 0
            && new_col < self.width as isize
        {
            let new_row = new_row as usize;
            let new_col = new_col as usize;

            self.board[row][col] = self.board[new_row][new_col];
            self.board[new_row][new_col] = 0;

            self.blank = (new_row, new_col);
            true
        } else {
            false
        }
    }

    /// Applies every move in order, stopping at the first one that would
    /// leave the grid. Moves before the offending one stay applied.
    pub fn apply_moves(&mut self, moves: &MoveString) -> Result<(), SolveError> {
        for mv in moves.iter() {
            if !self.apply_move(mv) {
                let (row, col) = self.blank;
                return Err(SolveError::OffGrid {
                    mv,
                    row,
                    col,
                    grid: self.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn is_solved(&self) -> bool {
        (0..self.height).all(|row| (0..self.width).all(|col| self.is_home(row, col)))
    }

    /// Whether the solved layout is reachable from this one.
    ///
    /// Every move is a transposition with the blank and shifts the blank's
    /// distance from (0, 0) by one, so the permutation parity (blank
    /// included) must match the parity of that distance.
    pub fn is_solvable(&self) -> bool {
        let flattened: Vec<u32> = self.board.iter().flatten().copied().collect();
        let (row, col) = self.blank;
        (count_inversions(&flattened) + row + col) % 2 == 0
    }

    /// Rearranges the tiles into a random solvable layout.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut flattened: Vec<u32> = self.board.iter().flatten().copied().collect();

        loop {
            flattened.shuffle(rng);

            for (i, &value) in flattened.iter().enumerate() {
                self.set(i / self.width, i % self.width, value);
            }

            if self.is_solvable() {
                break;
            }
        }
    }
}

fn check_size(height: usize, width: usize) -> Result<(), PuzzleError> {
    if height < 2 || width < 2 {
        return Err(PuzzleError::TooSmall { height, width });
    }
    Ok(())
}

fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .map(|(i, &val)| flattened[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

/// Parses rows separated by `/` or newlines, cells by spaces or commas:
/// `"8 7 6 / 5 4 3 / 2 1 0"`. Dimensions are taken from the text.
impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let layout = s
            .split(|c: char| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|cell| !cell.is_empty())
                    .map(|cell| {
                        cell.parse::<u32>()
                            .map_err(|_| PuzzleError::InvalidNumber(cell.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let height = layout.len();
        let width = layout.first().map_or(0, Vec::len);
        Self::from_layout(height, width, &layout)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = (self.height * self.width - 1).to_string().len();
        for row in &self.board {
            for (col, &val) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", val, width = cell_width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
