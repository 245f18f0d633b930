//! Tone output for terminals.
//!
//! A terminal has no square-wave generator; the closest thing is the bell.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::core::ToneDevice;

/// Rings the terminal bell for every audible tone. Pitch and length are ignored.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalBell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> ToneDevice for TerminalBell<W> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        if frequency_hz == 0 {
            return;
        }
        trace!(frequency_hz, duration_ms, "bell");
        let result = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(err) = result {
            debug!(%err, "bell write failed");
        }
    }
}

/// Swallows every tone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentTone;

impl ToneDevice for SilentTone {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        trace!(frequency_hz, duration_ms, "tone muted");
    }
}
