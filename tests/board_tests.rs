//! Board tests: cell access, locking and row compaction.

use proptest::prelude::*;

use tiny_tetris::core::board::BOARD_SIZE;
use tiny_tetris::core::{shape, Board};
use tiny_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PALETTE_SIZE};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), BOARD_SIZE);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert_eq!(board.get(9, 19), Some(0));
}

#[test]
fn test_board_set_rejects_bad_writes() {
    let mut board = Board::new();

    assert!(!board.set(-1, 0, 1));
    assert!(!board.set(0, BOARD_HEIGHT as i8, 1));
    assert!(!board.set(0, 0, PALETTE_SIZE as u8));
    assert_eq!(board.occupied_count(), 0);

    assert!(board.set(5, 10, 3));
    assert_eq!(board.get(5, 10), Some(3));
    assert!(board.is_occupied(5, 10));
    assert!(board.set(5, 10, 0));
    assert!(!board.is_occupied(5, 10));
}

#[test]
fn test_lock_skips_out_of_range_cells() {
    let mut board = Board::new();
    // Vertical I hanging off the top: only the two bottom cells land.
    let written = board.lock(&shape(PieceKind::I, 1), 0, -2, 4);
    assert_eq!(written, 2);
    assert_eq!(board.occupied_count(), 2);
    assert!(board.cells().iter().all(|&c| c == 0 || c == 4));
}

#[test]
fn test_compact_single_full_row() {
    let mut board = Board::from_rows(&["1.........", "2222222222"]);
    assert_eq!(board.compact(), 1);
    assert_eq!(board.get(0, 19), Some(1));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_compact_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        "..3.......",
        "1111111111",
        ".4........",
        "1111111111",
        "5.........",
    ]);
    assert_eq!(board.compact(), 2);
    assert_eq!(board.get(0, 19), Some(5));
    assert_eq!(board.get(1, 18), Some(4));
    assert_eq!(board.get(2, 17), Some(3));
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_compact_all_rows_full() {
    let rows = vec!["6666666666"; H];
    let mut board = Board::from_rows(&rows);
    assert_eq!(board.compact(), H);
    assert_eq!(board, Board::new());
}

#[test]
fn test_compact_no_full_rows_is_a_no_op() {
    let mut board = Board::from_rows(&["1.1.1.1.1.", ".2.2.2.2.2"]);
    let before = board.clone();
    assert_eq!(board.compact(), 0);
    assert_eq!(board, before);
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<u8>>> {
    let full_row = proptest::collection::vec(1..PALETTE_SIZE as u8, W);
    let any_row = proptest::collection::vec(0..PALETTE_SIZE as u8, W);
    proptest::collection::vec(prop_oneof![full_row, any_row], H)
}

fn board_of(rows: &[Vec<u8>]) -> Board {
    let mut board = Board::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            board.set(x as i8, y as i8, v);
        }
    }
    board
}

proptest! {
    #[test]
    fn compact_removes_exactly_the_full_rows(rows in arb_rows()) {
        let mut board = board_of(&rows);
        let full = rows.iter().filter(|r| r.iter().all(|&c| c != 0)).count();
        let survivors: Vec<&Vec<u8>> = rows.iter().filter(|r| r.iter().any(|&c| c == 0)).collect();

        prop_assert_eq!(board.compact(), full);

        // Height is unchanged and no full row remains.
        prop_assert_eq!(board.cells().len(), BOARD_SIZE);
        for y in 0..H {
            prop_assert!(!board.is_row_full(y));
        }

        // Cleared capacity comes back as empty rows on top.
        for y in 0..full {
            prop_assert!(board.row(y).unwrap().iter().all(|&c| c == 0));
        }

        // Survivors keep their relative order, packed against the floor.
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(board.row(full + i).unwrap(), row.as_slice());
        }
    }

    #[test]
    fn compact_is_idempotent(rows in arb_rows()) {
        let mut board = board_of(&rows);
        board.compact();
        let once = board.clone();
        prop_assert_eq!(board.compact(), 0);
        prop_assert_eq!(board, once);
    }
}
