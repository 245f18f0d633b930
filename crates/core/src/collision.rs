//! Placement checks against the board.

use crate::board::Board;
use crate::pieces::shape;
use crate::types::PieceKind;

/// Check whether `kind` in rotation state `rotation` at origin (x, y) overlaps
/// a wall, the floor, the ceiling or a filled cell.
pub fn collides(board: &Board, kind: PieceKind, rotation: u8, x: i8, y: i8) -> bool {
    shape(kind, rotation).iter().any(|&(dx, dy)| {
        // `get` is None outside the grid.
        !matches!(board.get(x.saturating_add(dx), y.saturating_add(dy)), Some(0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_accepts_spawn() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            assert!(!collides(&board, kind, 0, 3, 0), "{kind:?}");
        }
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::new();
        // I north occupies x..x+3 on row y+1.
        assert!(collides(&board, PieceKind::I, 0, -1, 0));
        assert!(collides(&board, PieceKind::I, 0, 7, 0));
        assert!(!collides(&board, PieceKind::I, 0, 6, 0));
        assert!(collides(&board, PieceKind::I, 0, 0, 19));
        assert!(!collides(&board, PieceKind::I, 0, 0, 18));
        assert!(collides(&board, PieceKind::Z, 0, 0, -1));
    }

    #[test]
    fn filled_cells_collide() {
        let mut board = Board::new();
        board.set(5, 1, 3);
        // O occupies (x+1..=x+2, y..=y+1).
        assert!(collides(&board, PieceKind::O, 0, 4, 0));
        assert!(collides(&board, PieceKind::O, 0, 3, 0));
        assert!(!collides(&board, PieceKind::O, 0, 5, 0));
    }

    #[test]
    fn extreme_origins_do_not_overflow() {
        let board = Board::new();
        assert!(collides(&board, PieceKind::I, 1, i8::MAX, i8::MAX));
        assert!(collides(&board, PieceKind::I, 1, i8::MIN, i8::MIN));
    }
}
