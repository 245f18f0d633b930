//! Core game logic module - pure, deterministic game engine
//!
//! This module contains all game rules and state management, completely
//! independent of display and input hardware. This design allows:
//!
//! - **Testable**: every rule is exercised without a terminal or a panel
//! - **Deterministic**: piece order comes from an injectable [`PieceSource`]
//! - **Portable**: the same engine drives the terminal front end or a real display
//! - **Fast**: zero-allocation tick path
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of palette indices with row compaction
//! - [`pieces`]: the seven piece kinds and their rotation states
//! - [`collision`]: placement check against walls, floor and filled cells
//! - [`debounce`]: single-shot direction events from level samples
//! - [`gravity`]: fixed-interval fall timer
//! - [`game_state`]: board plus active piece, spawn/move/rotate/lock
//! - [`engine`]: the per-tick state machine
//! - [`render`]: pixel composition of a frame
//! - [`device`]: input, display and tone interfaces
//! - [`rng`]: random and scripted piece sources
//!
//! # Game Rules
//!
//! - Pieces spawn at (3, 0). If that spot is taken, the board is wiped.
//! - Each tick applies at most one horizontal move, one clockwise rotation and
//!   one soft drop. Moves that collide are ignored; there are no wall kicks.
//! - Every 700ms gravity tries to move the piece down one row. If it cannot,
//!   the piece locks, full rows are removed and the next piece spawns.
//!
//! # Example
//!
//! ```
//! use tiny_tetris_core::{Fired, GameEngine, ScriptedPieces};
//! use tiny_tetris_core::types::PieceKind;
//!
//! let mut engine = GameEngine::new(ScriptedPieces::repeat(PieceKind::O));
//! engine.start(0);
//!
//! // Nothing pressed, gravity not yet due: nothing to draw.
//! assert!(!engine.step(Fired::NONE, 80).render);
//!
//! // 700ms later the piece falls one row.
//! assert!(engine.step(Fired::NONE, 700).render);
//! assert_eq!(engine.state().active().unwrap().y, 1);
//! ```

pub mod board;
pub mod collision;
pub mod debounce;
pub mod device;
pub mod engine;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod render;
pub mod rng;

pub use tiny_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use debounce::{Fired, InputDebouncer};
pub use device::{InputSource, Renderer, SharedRenderer, Tone, ToneDevice};
pub use engine::{plan_actions, GameEngine, TickReport};
pub use game_state::{ActivePiece, GameState, Phase};
pub use gravity::GravityScheduler;
pub use pieces::{palette_index, rotation_count, rotation_states, shape, RotationState};
pub use render::{board_origin, compose_frame, BoardView, Image};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};
