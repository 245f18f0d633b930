//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell holds a palette index (0 = empty).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, PALETTE_SIZE};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    ///
    /// Returns false if out of bounds or if `value` is not a palette index.
    pub fn set(&mut self, x: i8, y: i8, value: Cell) -> bool {
        if value as usize >= PALETTE_SIZE {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(v) if v != 0)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&c| c != 0))
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Remove every full row and let the rows above fall into the gap.
    ///
    /// Surviving rows keep their relative order and the vacated rows at the
    /// top are emptied. Returns the number of rows removed.
    pub fn compact(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = HEIGHT;

        // Two-pointer pass from the bottom up.
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(0);
        cleared
    }

    /// Write `value` into every in-range cell of `shape` placed at (x, y).
    ///
    /// Out-of-range cells are skipped. Returns the number of cells written.
    pub fn lock(&mut self, shape: &[(i8, i8)], x: i8, y: i8, value: Cell) -> usize {
        shape
            .iter()
            .filter(|&&(dx, dy)| self.set(x.saturating_add(dx), y.saturating_add(dy), value))
            .count()
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Build a board from text rows, top to bottom.
    ///
    /// `.` is empty, a digit is that palette index, any other character is 1.
    /// Missing leading rows are empty, so a picture of the bottom rows is enough.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let value = match ch {
                    '.' => 0,
                    c => c
                        .to_digit(10)
                        .map(|d| d as Cell)
                        .filter(|&d| (d as usize) < PALETTE_SIZE)
                        .unwrap_or(1),
                };
                board.cells[(offset + i) * WIDTH + x] = value;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
