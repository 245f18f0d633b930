//! Tiny Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and adds the pieces that tie
//! them into a program: configuration, background audio and the game loop.

pub use tiny_tetris_core as core;
pub use tiny_tetris_input as input;
pub use tiny_tetris_term as term;
pub use tiny_tetris_types as types;

pub mod audio;
pub mod config;
pub mod runner;

pub use audio::{AudioSystem, ToneQueue};
pub use config::{Args, ConfigError, GameConfig};
pub use runner::GameLoop;
