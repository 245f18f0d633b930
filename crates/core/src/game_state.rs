//! Game state module - board plus the active piece
//!
//! All mutation of the playfield goes through [`GameState`]. Movement requests
//! that would collide are dropped without error; locking writes the piece into
//! the board and compacts full rows.

use tracing::{debug, warn};

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::{next_rotation, palette_index, shape, RotationState};
use crate::types::{GameAction, PieceKind, SPAWN_POSITION};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// Create a piece in its first rotation state at (x, y)
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Get the cell offsets for the current rotation
    pub fn shape(&self) -> RotationState {
        shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four cells
    pub fn cells(&self) -> RotationState {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    pub fn collides(&self, board: &Board) -> bool {
        collides(board, self.kind, self.rotation, self.x, self.y)
    }

    pub fn color(&self) -> u8 {
        palette_index(self.kind)
    }
}

/// Where the engine is in the spawn/fall/lock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No active piece yet, or one is about to be created
    Spawning,
    /// A piece is in play
    Falling,
    /// The piece is being written into the board
    Locking,
    /// Full rows are being removed
    LineClear,
}

/// Board and active piece, owned by the engine
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    phase: Phase,
    /// Rows removed since the last reset (kept for a future scoring layer)
    lines_cleared: u32,
    pieces_locked: u32,
    board_resets: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: None,
            phase: Phase::Spawning,
            lines_cleared: 0,
            pieces_locked: 0,
            board_resets: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// How many times a blocked spawn has wiped the board
    pub fn board_resets(&self) -> u32 {
        self.board_resets
    }

    /// Put a new piece of `kind` at the spawn position.
    ///
    /// If the spawn cells are already taken the whole board is cleared and the
    /// same piece stays at the spawn position. Returns true in that case.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        self.phase = Phase::Spawning;
        let piece = ActivePiece::new(kind);

        let reset = piece.collides(&self.board);
        if reset {
            warn!(
                kind = kind.as_str(),
                occupied = self.board.occupied_count(),
                "spawn blocked, clearing board"
            );
            self.board.clear();
            self.board_resets = self.board_resets.wrapping_add(1);
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        reset
    }

    /// Replace the active piece if `piece` fits.
    pub fn place(&mut self, piece: ActivePiece) -> bool {
        if piece.collides(&self.board) {
            return false;
        }
        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = ActivePiece {
            x: active.x.saturating_add(dx),
            y: active.y.saturating_add(dy),
            ..active
        };
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Advance the active piece to its next rotation state, in place.
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: next_rotation(active.kind, active.rotation),
            ..active
        };
        // A single-state kind (O) rotates onto itself: nothing changes.
        if rotated == active || rotated.collides(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Apply a player action, returning whether the piece changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::SoftDrop => self.try_move(0, 1),
        }
    }

    /// Write the active piece into the board and remove full rows.
    ///
    /// Leaves the state in [`Phase::Spawning`] with no active piece.
    /// Returns the number of rows removed.
    pub fn lock(&mut self) -> usize {
        let Some(active) = self.active.take() else {
            return 0;
        };

        self.phase = Phase::Locking;
        self.board
            .lock(&active.shape(), active.x, active.y, active.color());
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        self.phase = Phase::LineClear;
        let cleared = self.board.compact();
        self.lines_cleared = self.lines_cleared.wrapping_add(cleared as u32);
        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            cleared,
            "piece locked"
        );

        self.phase = Phase::Spawning;
        cleared
    }

    /// Drop everything and go back to an empty board.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert!(state.active.is_none());
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.board.occupied_count(), 0);
    }

    #[test]
    fn test_spawn_places_piece_at_origin() {
        let mut state = GameState::new();
        assert!(!state.spawn(PieceKind::T));
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y, active.rotation), (3, 0, 0));
        assert_eq!(state.phase, Phase::Falling);
    }

    #[test]
    fn test_spawn_blocked_clears_board() {
        let mut state = GameState::new();
        state.board.set(4, 0, 2);
        state.board.set(0, 19, 2);
        assert!(state.spawn(PieceKind::O));
        assert_eq!(state.board.occupied_count(), 0);
        assert_eq!(state.active, Some(ActivePiece::new(PieceKind::O)));
        assert_eq!(state.board_resets, 1);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = GameState::new();
        state.spawn(PieceKind::O);
        // O occupies x+1..=x+2, so the left wall is reached at x = -1.
        for _ in 0..4 {
            assert!(state.try_move(-1, 0));
        }
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, -1);
    }

    #[test]
    fn test_rotate_blocked_keeps_state() {
        let mut state = GameState::new();
        state.spawn(PieceKind::I);
        // Vertical I needs rows 0..=3 in column x+2.
        state.board.set(5, 3, 1);
        assert!(!state.try_rotate());
        assert_eq!(state.active.unwrap().rotation, 0);
    }

    #[test]
    fn test_lock_writes_palette_index() {
        let mut state = GameState::new();
        state.spawn(PieceKind::T);
        assert_eq!(state.lock(), 0);
        assert!(state.active.is_none());
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.board.occupied_count(), 4);
        assert_eq!(state.board.get(4, 0), Some(palette_index(PieceKind::T)));
        assert_eq!(state.pieces_locked, 1);
    }

    #[test]
    fn test_lock_without_piece_is_noop() {
        let mut state = GameState::new();
        assert_eq!(state.lock(), 0);
        assert_eq!(state.pieces_locked, 0);
    }

    #[test]
    fn test_place_rejects_colliding_piece() {
        let mut state = GameState::new();
        assert!(!state.place(ActivePiece::at(PieceKind::O, 8, 0)));
        assert!(state.place(ActivePiece::at(PieceKind::O, 7, 0)));
    }
}
