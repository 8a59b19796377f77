//! Rotation resolver - wall-safe rotation by a single axis-aligned shift
//!
//! There is no kick table. The target rotation's bitmap is pushed back inside
//! the grid horizontally and vertically by exactly the amount it overhangs,
//! and the result is accepted only if the board can place it there.

use crate::board::Board;
use crate::pieces::piece_def;
use crate::types::{PieceKind, Rotation, COLUMNS, TOTAL_ROWS};

/// Compute the position of `kind` after turning to `target` from (col, row).
///
/// Returns the translated `(col, row)` when the rotated piece fits, `None`
/// when the single candidate position collides.
pub fn resolve_rotation(
    board: &Board,
    kind: PieceKind,
    col: i8,
    row: i8,
    target: Rotation,
) -> Option<(i8, i8)> {
    let def = piece_def(kind);
    let space = def.spacing(target);
    let last = def.dimension() - 1;

    let new_col = shift_inside(col, space.left, last - space.right, COLUMNS);
    let new_row = shift_inside(row, space.top, last - space.bottom, TOTAL_ROWS);

    board
        .can_place(kind, target, new_col, new_row)
        .then_some((new_col, new_row))
}

/// Shift `origin` so that the occupied span `[origin + first, origin + last]`
/// lies inside `[0, limit)`.
fn shift_inside(origin: i8, first: i8, last: i8, limit: i8) -> i8 {
    let low = origin + first;
    let high = origin + last;
    if low < 0 {
        origin - low
    } else if high >= limit {
        origin - (high - (limit - 1))
    } else {
        origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_inside_keeps_in_range_span() {
        assert_eq!(shift_inside(3, 0, 3, 10), 3);
    }

    #[test]
    fn shift_inside_pushes_right_by_deficit() {
        // occupied span would start at -2
        assert_eq!(shift_inside(-2, 0, 3, 10), 0);
        assert_eq!(shift_inside(-3, 1, 1, 10), -1);
    }

    #[test]
    fn shift_inside_pushes_left_by_excess() {
        // occupied span would end at 11
        assert_eq!(shift_inside(8, 0, 3, 10), 6);
    }

    #[test]
    fn rotation_in_open_space_keeps_position() {
        let board = Board::new();
        assert_eq!(
            resolve_rotation(&board, PieceKind::T, 4, 5, Rotation::East),
            Some((4, 5))
        );
    }

    #[test]
    fn i_piece_off_left_wall_is_shifted_right() {
        let board = Board::new();
        // West state occupies bitmap column 1, so column -1 hugs the wall.
        assert!(board.can_place(PieceKind::I, Rotation::West, -1, 5));
        assert_eq!(
            resolve_rotation(&board, PieceKind::I, -1, 5, Rotation::North),
            Some((0, 5))
        );
    }

    #[test]
    fn rotation_rejected_when_shifted_position_collides() {
        let mut board = Board::new();
        board.set(0, 6, Some(PieceKind::O));
        assert_eq!(
            resolve_rotation(&board, PieceKind::I, -1, 5, Rotation::North),
            None
        );
    }
}
