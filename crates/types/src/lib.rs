//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal front end and the tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, 0), i.e. `BOARD_WIDTH / 2 - 2` on the top row
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 80 | Input polling interval of the main loop |
//! | `FALL_INTERVAL_MS` | 700 | Gravity interval (one row per interval) |
//! | `SOFT_DROP_TONE_MS` | 40 | Length of the soft drop click |
//!
//! # Display
//!
//! The game targets a 240×240 pixel panel. Each board cell is drawn as a
//! 12×12 pixel block, so the board image is 120×240 and sits centered on the
//! panel at (60, 0).
//!
//! # Examples
//!
//! ```
//! use tiny_tetris_types::{Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PALETTE_SIZE};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.index(), 2);
//!
//! assert_eq!(Direction::ALL.len(), 4);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! assert_eq!(PALETTE_SIZE, 7);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn origin for every new piece (x, y)
pub const SPAWN_POSITION: (i8, i8) = (BOARD_WIDTH as i8 / 2 - 2, 0);

/// Number of cells in every piece
pub const CELL_COUNT: usize = 4;

/// Main loop polling interval (80ms)
pub const TICK_MS: u32 = 80;

/// Gravity interval (700ms per row)
pub const FALL_INTERVAL_MS: u32 = 700;

/// Frequency of the soft drop click
pub const SOFT_DROP_TONE_HZ: u32 = 880;

/// Duration of the soft drop click
pub const SOFT_DROP_TONE_MS: u32 = 40;

/// Display panel width in pixels
pub const DISPLAY_WIDTH: u16 = 240;

/// Display panel height in pixels
pub const DISPLAY_HEIGHT: u16 = 240;

/// Edge length of one board cell in pixels
pub const BLOCK_SIZE: u16 = 12;

/// Number of palette entries, including the empty entry at index 0
pub const PALETTE_SIZE: usize = 7;

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..PALETTE_SIZE`: Cell filled with the given palette index
pub type Cell = u8;

/// The seven tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PieceKind::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// The four direction inputs.
///
/// `Up` rotates clockwise and `Down` soft-drops; `Left`/`Right` shift the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions in sampling order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Game action triggered when this direction fires
    pub fn action(self) -> GameAction {
        match self {
            Direction::Left => GameAction::MoveLeft,
            Direction::Up => GameAction::RotateCw,
            Direction::Right => GameAction::MoveRight,
            Direction::Down => GameAction::SoftDrop,
        }
    }
}

/// Player actions that can be applied to the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece to its next rotation state
    RotateCw,
    /// Move piece one cell down (never locks)
    SoftDrop,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::SoftDrop => "softDrop",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Block colors indexed by board cell value. Index 0 is the empty color.
pub const PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0, 0, 0),
    Rgb::new(200, 80, 80),
    Rgb::new(80, 200, 120),
    Rgb::new(120, 120, 200),
    Rgb::new(200, 200, 80),
    Rgb::new(200, 120, 200),
    Rgb::new(120, 200, 200),
];

/// Background of the board image
pub const BOARD_BACKGROUND: Rgb = Rgb::new(0, 0, 20);

/// Color the panel is cleared to before the first frame
pub const SCREEN_BACKGROUND: Rgb = Rgb::new(0, 0, 0);
