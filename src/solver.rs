//! Constructive solver: bottom rows right to left, then column 0, then the
//! top two rows in pairs, then the 2×2 corner.
//!
//! Each phase checks its entry contract, applies its moves to the grid and
//! checks the contract the next phase expects. A broken contract is reported
//! as a [`SolveError`] carrying the grid at that point.

use tracing::{debug, info, trace};

use crate::error::{Invariant, SolveError};
use crate::moves::{Idiom, Move, MoveString};
use crate::planner::position_tile;
use crate::puzzle::{Position, Puzzle};

/// Attempts allowed for the 2×2 corner before giving up.
///
/// On a solvable grid the first pattern-matched idiom always settles it.
const MAX_CORNER_ATTEMPTS: usize = 2;

impl Puzzle {
    /// Solves the whole grid, returning every blank move made.
    ///
    /// The grid ends solved. An already solved grid yields no moves.
    pub fn solve_puzzle(&mut self) -> Result<MoveString, SolveError> {
        let (height, width) = (self.height(), self.width());
        info!(height, width, "solving puzzle");

        let mut moves = MoveString::new();
        if self.is_solved() {
            info!("already solved");
            return Ok(moves);
        }

        let (mut row, mut col) = self.frontier();
        let (blank_row, blank_col) = self.blank();
        trace!(
            blank = ?(blank_row, blank_col),
            frontier = ?(row, col),
            "driving blank to frontier"
        );

        // the frontier never precedes the blank in row-major order
        if col >= blank_col {
            moves.repeat(Move::Right, col - blank_col);
        } else {
            moves.repeat(Move::Left, blank_col - col);
        }
        moves.repeat(Move::Down, row - blank_row);
        self.apply_moves(&moves)?;

        while row > 1 {
            if col > 0 {
                moves.append(&self.solve_interior_tile(row, col)?);
                col -= 1;
            } else {
                moves.append(&self.solve_col0_tile(row)?);
                row -= 1;
                col = width - 1;
            }
        }

        for col in (2..width).rev() {
            moves.append(&self.solve_row1_tile(col)?);
            moves.append(&self.solve_row0_tile(col)?);
        }

        moves.append(&self.solve_2x2()?);
        self.ensure(self.is_solved(), "solve", Invariant::Solved, (0, 0))?;

        info!(moves = moves.len(), "puzzle solved");
        Ok(moves)
    }

    /// The next cell to solve: the last cell in row-major order, among rows
    /// 2 and below, that does not hold its solved tile. When all of those
    /// rows are solved the two-row phase starts at `(1, width - 1)`.
    pub fn frontier(&self) -> Position {
        for row in (2..self.height()).rev() {
            for col in (0..self.width()).rev() {
                if !self.is_home(row, col) {
                    return (row, col);
                }
            }
        }
        (1, self.width() - 1)
    }

    /// Places the tile for `(row, col)`, with `row > 1` and `col > 0`.
    ///
    /// Requires the lower-row invariant at `(row, col)` and leaves it at
    /// `(row, col - 1)`.
    pub fn solve_interior_tile(&mut self, row: usize, col: usize) -> Result<MoveString, SolveError> {
        assert!(row > 1 && col > 0, "({row}, {col}) is not an interior cell");
        const PHASE: &str = "interior tile";
        self.ensure(self.lower_row_invariant(row, col), PHASE, Invariant::LowerRow, (row, col))?;

        let current = self.locate_home_tile(row, col)?;
        let moves = position_tile(current, (row, col));
        self.apply_moves(&moves)?;

        self.ensure(
            self.lower_row_invariant(row, col - 1),
            PHASE,
            Invariant::LowerRow,
            (row, col - 1),
        )?;
        debug!(row, col, %moves, "placed interior tile");
        Ok(moves)
    }

    /// Places the tile for `(row, 0)`, with `row > 1`.
    ///
    /// Requires the lower-row invariant at `(row, 0)` and leaves it at
    /// `(row - 1, width - 1)`. The tile is parked at `(row - 1, 1)` and
    /// dropped in with the column-0 elevator, unless stepping the blank up
    /// already brought it home.
    pub fn solve_col0_tile(&mut self, row: usize) -> Result<MoveString, SolveError> {
        assert!(row > 1, "row {row} is not below the two-row phase");
        const PHASE: &str = "column-0 tile";
        self.ensure(self.lower_row_invariant(row, 0), PHASE, Invariant::LowerRow, (row, 0))?;

        let mut moves = MoveString::from(Idiom::StepUpRight);
        self.apply_moves(&moves)?;

        let mut rest = MoveString::new();
        if !self.is_home(row, 0) {
            let current = self.locate_home_tile(row, 0)?;
            rest.append(&position_tile(current, (row - 1, 1)));
            rest.push_idiom(Idiom::ColumnZeroElevator);
        }
        rest.repeat(Move::Right, self.width() - 2);
        self.apply_moves(&rest)?;
        moves.append(&rest);

        let last_col = self.width() - 1;
        self.ensure(
            self.lower_row_invariant(row - 1, last_col),
            PHASE,
            Invariant::LowerRow,
            (row - 1, last_col),
        )?;
        debug!(row, %moves, "placed column-0 tile");
        Ok(moves)
    }

    /// Places the tile for `(1, col)`, with `col > 1`.
    ///
    /// Requires the row-1 invariant at `col` and leaves the row-0 invariant
    /// at `col`.
    pub fn solve_row1_tile(&mut self, col: usize) -> Result<MoveString, SolveError> {
        assert!(col > 1, "column {col} belongs to the 2x2 corner");
        const PHASE: &str = "row-1 tile";
        self.ensure(self.row1_invariant(col), PHASE, Invariant::RowOne, (1, col))?;

        let current = self.locate_home_tile(1, col)?;
        let mut moves = position_tile(current, (1, col));
        moves.push_idiom(Idiom::StepUpRight);
        self.apply_moves(&moves)?;

        self.ensure(self.row0_invariant(col), PHASE, Invariant::RowZero, (0, col))?;
        debug!(col, %moves, "placed row-1 tile");
        Ok(moves)
    }

    /// Places the tile for `(0, col)`, with `col > 1`.
    ///
    /// Requires the row-0 invariant at `col` and leaves the row-1 invariant
    /// at `col - 1`. Tucking the blank down-left finishes at once when the
    /// tile was waiting beside its cell; otherwise the tile is parked at
    /// `(1, col - 1)` and lifted in.
    pub fn solve_row0_tile(&mut self, col: usize) -> Result<MoveString, SolveError> {
        assert!(col > 1, "column {col} belongs to the 2x2 corner");
        const PHASE: &str = "row-0 tile";
        self.ensure(self.row0_invariant(col), PHASE, Invariant::RowZero, (0, col))?;

        let mut moves = MoveString::from(Idiom::TuckLeft);
        self.apply_moves(&moves)?;

        if !self.is_home(0, col) {
            let current = self.locate_home_tile(0, col)?;
            let mut rest = position_tile(current, (1, col - 1));
            rest.push_idiom(Idiom::RowZeroFinish);
            self.apply_moves(&rest)?;
            moves.append(&rest);
        }

        self.ensure(self.row1_invariant(col - 1), PHASE, Invariant::RowOne, (1, col - 1))?;
        debug!(col, %moves, "placed row-0 tile");
        Ok(moves)
    }

    /// Solves the top-left 2×2 block, homing the blank at `(0, 0)`.
    ///
    /// Requires the lower-row invariant at `(1, 1)`. The corner arrangement
    /// picks one idiom; should the corner still be off, the remaining three
    /// tiles are rotated once more before giving up.
    pub fn solve_2x2(&mut self) -> Result<MoveString, SolveError> {
        const PHASE: &str = "2x2 corner";
        self.ensure(self.corner_ready(), PHASE, Invariant::LowerRow, (1, 1))?;

        let width = self.width() as u32;
        let idiom = if self.get(0, 1) == 1 && self.get(1, 0) == width + 1 {
            Idiom::CornerLeftUp
        } else if self.get(0, 0) == 1 && self.get(1, 0) == width {
            Idiom::CornerUpLeft
        } else {
            Idiom::CornerCycle
        };
        let mut moves = MoveString::from(idiom);
        self.apply_moves(&moves)?;

        let mut attempts = 1;
        while !self.corner_settled() {
            if attempts == MAX_CORNER_ATTEMPTS {
                return Err(SolveError::CornerUnsettled {
                    attempts,
                    grid: self.to_string(),
                });
            }
            let rotation = MoveString::from(Idiom::CornerRotate);
            self.apply_moves(&rotation)?;
            moves.append(&rotation);
            attempts += 1;
        }

        debug!(attempts, %moves, "solved 2x2 corner");
        Ok(moves)
    }

    fn corner_settled(&self) -> bool {
        self.is_home(0, 0) && self.is_home(0, 1) && self.is_home(1, 0) && self.is_home(1, 1)
    }

    fn ensure(
        &self,
        holds: bool,
        phase: &'static str,
        invariant: Invariant,
        (row, col): Position,
    ) -> Result<(), SolveError> {
        if holds {
            Ok(())
        } else {
            Err(SolveError::InvariantViolated {
                phase,
                invariant,
                row,
                col,
                grid: self.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(rows: &[&[u32]]) -> Puzzle {
        let layout: Vec<Vec<u32>> = rows.iter().map(|row| row.to_vec()).collect();
        Puzzle::from_layout(layout.len(), layout[0].len(), &layout).unwrap()
    }

    #[test]
    fn test_frontier_skips_solved_tail() {
        let p = puzzle(&[&[1, 2, 3], &[4, 0, 5], &[7, 6, 8]]);
        assert_eq!(p.frontier(), (2, 1));
    }

    #[test]
    fn test_frontier_is_last_cell_when_blank_sits_there() {
        let mut p = Puzzle::new(3, 3).unwrap();
        p.apply_moves(&"rrdd".parse().unwrap()).unwrap();
        assert_eq!(p.rows(), &[vec![1, 2, 5], vec![3, 4, 8], vec![6, 7, 0]]);
        assert_eq!(p.frontier(), (2, 2));
    }

    #[test]
    fn test_frontier_enters_two_row_phase() {
        let p = puzzle(&[&[3, 1, 2], &[0, 4, 5], &[6, 7, 8]]);
        assert_eq!(p.frontier(), (1, 2));
        let p = puzzle(&[&[3, 1], &[0, 2]]);
        assert_eq!(p.frontier(), (1, 1));
    }

    #[test]
    fn test_interior_tile() {
        let mut p = puzzle(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]);
        let moves = p.solve_interior_tile(2, 2).unwrap();
        assert_eq!(moves.to_string(), "uulldrruldrulddruld");
        assert!(p.lower_row_invariant(2, 1));
    }

    #[test]
    fn test_interior_tile_rejects_broken_precondition() {
        let mut p = puzzle(&[&[8, 7, 6], &[5, 4, 3], &[2, 0, 1]]);
        let err = p.solve_interior_tile(2, 2).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvariantViolated {
                invariant: Invariant::LowerRow,
                row: 2,
                col: 2,
                ..
            }
        ));
        // nothing was applied
        assert_eq!(p.blank(), (2, 1));
    }

    #[test]
    fn test_col0_tile_with_elevator() {
        let mut p = puzzle(&[&[1, 2, 6], &[4, 5, 3], &[0, 7, 8]]);
        let moves = p.solve_col0_tile(2).unwrap();
        assert_eq!(moves.to_string(), "ururdluldruldrdlurdluurddlurr");
        assert!(p.lower_row_invariant(1, 2));
    }

    #[test]
    fn test_col0_tile_already_above() {
        let mut p = puzzle(&[&[1, 2, 3], &[6, 4, 5], &[0, 7, 8]]);
        let moves = p.solve_col0_tile(2).unwrap();
        assert_eq!(moves.to_string(), "urr");
        assert!(p.lower_row_invariant(1, 2));
    }

    #[test]
    fn test_row1_tile() {
        let mut p = puzzle(&[&[4, 6, 5, 3], &[1, 2, 0, 7]]);
        let moves = p.solve_row1_tile(2).unwrap();
        assert_eq!(moves.to_string(), "uldruldur");
        assert!(p.row0_invariant(2));
    }

    #[test]
    fn test_row0_tile() {
        let mut p = puzzle(&[&[4, 1, 0], &[2, 3, 5], &[6, 7, 8]]);
        let moves = p.solve_row0_tile(2).unwrap();
        assert_eq!(moves.to_string(), "ldlurdlurrdluldrruld");
        assert_eq!(p.rows(), &[vec![3, 4, 2], vec![1, 0, 5], vec![6, 7, 8]]);
    }

    #[test]
    fn test_row0_tile_on_wide_grid() {
        let mut p = puzzle(&[
            &[7, 6, 5, 3, 0],
            &[4, 8, 2, 1, 9],
            &[10, 11, 12, 13, 14],
            &[15, 16, 17, 18, 19],
        ]);
        p.solve_row0_tile(4).unwrap();
        assert!(p.row1_invariant(3));
    }

    #[test]
    fn test_row0_tile_waiting_beside_its_cell() {
        let mut p = puzzle(&[&[1, 2, 0], &[3, 4, 5]]);
        let moves = p.solve_row0_tile(2).unwrap();
        assert_eq!(moves.to_string(), "ld");
        assert!(p.row1_invariant(1));
    }

    #[test]
    fn test_2x2_arrangements() {
        for (rows, expected) in [
            ([[1, 3], [2, 0]], "ul"),
            ([[2, 1], [3, 0]], "lu"),
            ([[3, 2], [1, 0]], "uldrul"),
        ] {
            let mut p = Puzzle::from_layout(2, 2, &[rows[0].to_vec(), rows[1].to_vec()]).unwrap();
            assert_eq!(p.solve_2x2().unwrap().to_string(), expected);
            assert!(p.is_solved());
        }
    }

    #[test]
    fn test_2x2_gives_up_on_unsolvable_corner() {
        let mut p = puzzle(&[&[1, 3], &[2, 0]]);
        // swap two tiles to flip the parity
        p.set(0, 0, 2);
        p.set(1, 0, 1);
        let err = p.solve_2x2().unwrap_err();
        assert!(matches!(
            err,
            SolveError::CornerUnsettled {
                attempts: MAX_CORNER_ATTEMPTS,
                ..
            }
        ));
    }

    #[test]
    fn test_solve_already_solved_is_empty() {
        let mut p = Puzzle::new(4, 3).unwrap();
        assert!(p.solve_puzzle().unwrap().is_empty());
        assert!(p.is_solved());
    }

    #[test]
    fn test_solve_leaves_grid_solved() {
        let mut p = puzzle(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]);
        p.solve_puzzle().unwrap();
        assert!(p.is_solved());
        assert_eq!(p.blank(), (0, 0));
    }
}
