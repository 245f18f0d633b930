//! Terminal input module (engine-facing).
//!
//! Turns `crossterm` key events into the level-sampled direction inputs the
//! engine reads through [`tiny_tetris_core::InputSource`], plus the quit and
//! restart commands handled by the front end.

pub mod keyboard;
pub mod map;

pub use tiny_tetris_types as types;

pub use keyboard::{disable_key_release_events, enable_key_release_events, KeyboardInput};
pub use map::{command_for_key, direction_for_key, is_restart, should_quit, Command};
