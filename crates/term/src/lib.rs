//! Terminal front-end devices.
//!
//! Plays the part of the hardware a real build would drive: a 240×240 panel
//! emulated as coloured terminal cells and a bell standing in for the buzzer.
//! Rendering goes into a simple framebuffer that is diffed and flushed to the
//! terminal, with no widget or layout library in between.

pub mod display;
pub mod fb;
pub mod renderer;
pub mod tone;

pub use tiny_tetris_core as core;
pub use tiny_tetris_types as types;

pub use display::{CellPixels, TerminalDisplay, DEFAULT_FOOTER};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use tone::{SilentTone, TerminalBell};
