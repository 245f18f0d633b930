//! Pieces module - tetromino shapes and rotation states
//!
//! Every kind owns an ordered list of rotation states. Rotating advances to the
//! next state modulo the list length; there are no wall kicks.

use crate::types::{PieceKind, CELL_COUNT, PALETTE_SIZE};

/// Offset of a single cell relative to piece origin
pub type CellOffset = (i8, i8);

/// One orientation of a piece - 4 cell offsets from piece origin
pub type RotationState = [CellOffset; CELL_COUNT];

const I_STATES: [RotationState; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_STATES: [RotationState; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_STATES: [RotationState; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [RotationState; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_STATES: [RotationState; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_STATES: [RotationState; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [RotationState; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Rotation tables indexed by [`PieceKind::index`]
static CATALOG: [&[RotationState]; 7] = [
    &I_STATES, &O_STATES, &T_STATES, &S_STATES, &Z_STATES, &J_STATES, &L_STATES,
];

/// All rotation states of a kind, in clockwise order
pub fn rotation_states(kind: PieceKind) -> &'static [RotationState] {
    CATALOG[kind.index()]
}

/// Number of distinct rotation states of a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Cell offsets of `kind` in rotation state `rotation` (taken modulo the count)
pub fn shape(kind: PieceKind, rotation: u8) -> RotationState {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Rotation index reached by one clockwise turn from `rotation`
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}

/// Palette index a kind is drawn and locked with.
///
/// There are six block colors for seven kinds, so `L` wraps onto `I`'s color.
pub fn palette_index(kind: PieceKind) -> u8 {
    (kind.index() % (PALETTE_SIZE - 1)) as u8 + 1
}
