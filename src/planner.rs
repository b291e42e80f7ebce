//! Tile positioning: walks one tile to its target cell.

use crate::moves::{Idiom, Move, MoveString};
use crate::puzzle::Position;

/// Builds the moves that carry the tile at `current` into `target`, given
/// the blank starts on `target`.
///
/// The tile must sit earlier than `target` in row-major order, or to its
/// right on the same row, and `target` must have a row above it and a column
/// to its left. Rows below `target` are never visited. Cells right of
/// `target` on its own row are only visited when the tile starts on that
/// row, or starts on row 0 while `target` is on row 1. The blank finishes
/// immediately left of the delivered tile.
///
/// This is a pure function of the two positions; callers apply and verify.
pub fn position_tile(current: Position, target: Position) -> MoveString {
    let (cur_row, cur_col) = current;
    let (target_row, target_col) = target;
    let mut moves = MoveString::new();

    if cur_row == target_row {
        if cur_col < target_col {
            let distance = target_col - cur_col;
            moves.repeat(Move::Left, distance);
            moves.repeat_idiom(Idiom::CarryRightOver, distance - 1);
        } else {
            let distance = cur_col - target_col;
            moves.repeat(Move::Right, distance);
            moves.repeat_idiom(Idiom::CarryLeftOver, distance - 1);
            moves.push_idiom(Idiom::SwingLeft);
        }
        return moves;
    }

    debug_assert!(cur_row < target_row, "tile below its target: {current:?} -> {target:?}");
    let rise = target_row - cur_row;
    // the blank climbs onto the tile's column; the tile drops one row if it
    // was directly above
    moves.repeat(Move::Up, rise);

    // no row above row 0, so loops there pass underneath
    let on_top_row = cur_row == 0;

    if cur_col == target_col {
        moves.repeat_idiom(Idiom::CarryDown, rise - 1);
    } else if cur_col < target_col {
        let distance = target_col - cur_col;
        moves.repeat(Move::Left, distance);
        let carry = if on_top_row {
            Idiom::CarryRightUnder
        } else {
            Idiom::CarryRightOver
        };
        moves.repeat_idiom(carry, distance - 1);
        moves.push_idiom(Idiom::DropFromLeft);
        moves.repeat_idiom(Idiom::CarryDown, rise - 1);
    } else {
        let distance = cur_col - target_col;
        moves.repeat(Move::Right, distance);
        let (carry, drop) = if on_top_row {
            (Idiom::CarryLeftUnder, Idiom::DropFromRight)
        } else {
            (Idiom::CarryLeftOver, Idiom::DropFromRightOver)
        };
        moves.repeat_idiom(carry, distance - 1);
        moves.push_idiom(drop);
        moves.repeat_idiom(Idiom::CarryDown, rise - 1);
    }

    moves.push_idiom(Idiom::TuckLeft);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Puzzle;

    /// Puts the tile that belongs at `target` on `current` and the blank on
    /// `target`, everything else in solved order.
    fn staged(height: usize, width: usize, current: Position, target: Position) -> Puzzle {
        let mut puzzle = Puzzle::new(height, width).unwrap();
        let tile = puzzle.solved_value(target.0, target.1);
        let displaced = puzzle.get(current.0, current.1);
        // swap three values: blank -> target, tile -> current, displaced -> (0, 0)
        puzzle.set(0, 0, displaced);
        puzzle.set(current.0, current.1, tile);
        puzzle.set(target.0, target.1, 0);
        puzzle
    }

    fn assert_delivers(height: usize, width: usize, current: Position, target: Position) {
        let mut puzzle = staged(height, width, current, target);
        let moves = position_tile(current, target);
        puzzle
            .apply_moves(&moves)
            .unwrap_or_else(|e| panic!("{current:?} -> {target:?}: {e}"));
        assert!(
            puzzle.is_home(target.0, target.1),
            "{current:?} -> {target:?} via {moves} left\n{puzzle}"
        );
        assert_eq!(puzzle.blank(), (target.0, target.1 - 1));
        // nothing solved below or to the right of the target moved
        for row in target.0..height {
            for col in 0..width {
                if row > target.0 || col > target.1 {
                    assert!(puzzle.is_home(row, col), "disturbed ({row}, {col}) via {moves}");
                }
            }
        }
    }

    #[test]
    fn test_same_row_from_left() {
        assert_eq!(position_tile((2, 0), (2, 3)).to_string(), "lllurrdlurrdl");
        assert_delivers(3, 4, (2, 0), (2, 3));
        assert_delivers(3, 4, (2, 2), (2, 3));
    }

    #[test]
    fn test_directly_above() {
        assert_eq!(position_tile((0, 2), (2, 2)).to_string(), "uulddruld");
        assert_delivers(4, 4, (0, 2), (3, 2));
        assert_delivers(4, 4, (2, 2), (3, 2));
    }

    #[test]
    fn test_above_and_left() {
        assert_delivers(4, 5, (0, 0), (3, 4));
        assert_delivers(4, 5, (1, 1), (3, 4));
        assert_delivers(4, 5, (2, 3), (3, 4));
    }

    #[test]
    fn test_above_and_right() {
        assert_eq!(position_tile((0, 3), (2, 1)).to_string(), "uurrdllurdlulddruld");
        assert_delivers(4, 5, (0, 4), (3, 1));
        assert_delivers(4, 5, (1, 4), (3, 1));
        assert_delivers(4, 5, (2, 2), (3, 1));
    }

    #[test]
    fn test_same_row_from_right() {
        assert_eq!(position_tile((1, 3), (1, 1)).to_string(), "rrulldrulld");
        // row 0 is scratch space, rows 2.. must survive
        let mut puzzle = Puzzle::from_layout(
            3,
            4,
            &[vec![1, 2, 3, 4], vec![5, 0, 6, 7], vec![8, 9, 10, 11]],
        )
        .unwrap();
        puzzle.apply_moves(&position_tile((1, 3), (1, 1))).unwrap();
        assert_eq!(puzzle.get(1, 1), 7);
        assert_eq!(puzzle.blank(), (1, 0));
        assert_eq!(puzzle.rows()[2], vec![8, 9, 10, 11]);
    }

    #[test]
    fn test_every_source_cell_on_a_4x4() {
        for target_row in 2..4 {
            for target_col in 1..4 {
                for row in 0..=target_row {
                    for col in 0..4 {
                        if row == target_row && col >= target_col {
                            continue;
                        }
                        assert_delivers(4, 4, (row, col), (target_row, target_col));
                    }
                }
            }
        }
    }
}
