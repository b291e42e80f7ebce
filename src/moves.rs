//! Blank moves, move strings and the table of named move idioms.
//!
//! A [`Move`] always names the direction the *blank* travels: `Left` swaps
//! the blank with the tile to its left, which therefore slides right.

use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// Row and column delta of the blank for this move.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Move::Left => 'l',
            Move::Right => 'r',
            Move::Up => 'u',
            Move::Down => 'd',
        }
    }

    pub fn from_char(c: char) -> Result<Self, PuzzleError> {
        match c {
            'l' => Ok(Move::Left),
            'r' => Ok(Move::Right),
            'u' => Ok(Move::Up),
            'd' => Ok(Move::Down),
            other => Err(PuzzleError::InvalidMove(other)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered sequence of blank moves; the solver's only output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveString(Vec<Move>);

impl MoveString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied()
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    /// Appends `mv` `count` times.
    pub fn repeat(&mut self, mv: Move, count: usize) {
        self.0.extend(std::iter::repeat(mv).take(count));
    }

    pub fn push_idiom(&mut self, idiom: Idiom) {
        self.0.extend_from_slice(idiom.moves());
    }

    /// Appends `idiom` `count` times.
    pub fn repeat_idiom(&mut self, idiom: Idiom, count: usize) {
        for _ in 0..count {
            self.push_idiom(idiom);
        }
    }

    pub fn append(&mut self, other: &MoveString) {
        self.0.extend_from_slice(&other.0);
    }
}

impl From<Vec<Move>> for MoveString {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl From<Idiom> for MoveString {
    fn from(idiom: Idiom) -> Self {
        Self(idiom.moves().to_vec())
    }
}

impl FromStr for MoveString {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().map(Move::from_char).collect::<Result<Vec<_>, _>>().map(Self)
    }
}

impl fmt::Display for MoveString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

use Move::{Down as D, Left as L, Right as R, Up as U};

/// Fixed move sequences with a known net effect, named by what they do.
///
/// "Carry" idioms walk the blank around a tile so the tile advances one cell
/// and the blank ends on the tile's trailing side again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    /// `urrdl`: blank left of a tile, loop over it; tile one column right.
    CarryRightOver,
    /// `drrul`: as [`Idiom::CarryRightOver`] but looping underneath.
    CarryRightUnder,
    /// `ulldr`: blank right of a tile, loop over it; tile one column left.
    CarryLeftOver,
    /// `dllur`: as [`Idiom::CarryLeftOver`] but looping underneath.
    CarryLeftUnder,
    /// `lddru`: blank above a tile, loop down its left; tile one row down.
    CarryDown,
    /// `dru`: blank left of a tile, pull it down one row from below.
    DropFromLeft,
    /// `dlu`: blank right of a tile, pull it down one row from below.
    DropFromRight,
    /// `ullddru`: blank right of a tile, circle over and pull it down one row.
    DropFromRightOver,
    /// `ulld`: blank right of a tile, circle over to its left side.
    SwingLeft,
    /// `ld`: blank above a tile, settle to its left.
    TuckLeft,
    /// `ur`: step up and right.
    StepUpRight,
    /// `ruldrdlurdluurddlur`: drops the tile at `(r-1, 1)` into `(r, 0)`
    /// keeping `(r, 1)` in place.
    ColumnZeroElevator,
    /// `urdlurrdluldrruld`: with the row-0 tile at `(1, c-1)` and the blank
    /// left of it, lifts the tile into `(0, c)` keeping `(1, c)` in place.
    RowZeroFinish,
    /// `lu`: home the blank through the left cell.
    CornerLeftUp,
    /// `ul`: home the blank through the upper cell.
    CornerUpLeft,
    /// `uldrul`: home the blank after one extra three-tile cycle.
    CornerCycle,
    /// `rdlu`: from the home cell, cycle the other three corner tiles.
    CornerRotate,
}

impl Idiom {
    pub const ALL: [Idiom; 17] = [
        Idiom::CarryRightOver,
        Idiom::CarryRightUnder,
        Idiom::CarryLeftOver,
        Idiom::CarryLeftUnder,
        Idiom::CarryDown,
        Idiom::DropFromLeft,
        Idiom::DropFromRight,
        Idiom::DropFromRightOver,
        Idiom::SwingLeft,
        Idiom::TuckLeft,
        Idiom::StepUpRight,
        Idiom::ColumnZeroElevator,
        Idiom::RowZeroFinish,
        Idiom::CornerLeftUp,
        Idiom::CornerUpLeft,
        Idiom::CornerCycle,
        Idiom::CornerRotate,
    ];

    pub fn moves(self) -> &'static [Move] {
        match self {
            Idiom::CarryRightOver => &[U, R, R, D, L],
            Idiom::CarryRightUnder => &[D, R, R, U, L],
            Idiom::CarryLeftOver => &[U, L, L, D, R],
            Idiom::CarryLeftUnder => &[D, L, L, U, R],
            Idiom::CarryDown => &[L, D, D, R, U],
            Idiom::DropFromLeft => &[D, R, U],
            Idiom::DropFromRight => &[D, L, U],
            Idiom::DropFromRightOver => &[U, L, L, D, D, R, U],
            Idiom::SwingLeft => &[U, L, L, D],
            Idiom::TuckLeft => &[L, D],
            Idiom::StepUpRight => &[U, R],
            Idiom::ColumnZeroElevator => &[
                R, U, L, D, R, D, L, U, R, D, L, U, U, R, D, D, L, U, R,
            ],
            Idiom::RowZeroFinish => &[U, R, D, L, U, R, R, D, L, U, L, D, R, R, U, L, D],
            Idiom::CornerLeftUp => &[L, U],
            Idiom::CornerUpLeft => &[U, L],
            Idiom::CornerCycle => &[U, L, D, R, U, L],
            Idiom::CornerRotate => &[R, D, L, U],
        }
    }
}
