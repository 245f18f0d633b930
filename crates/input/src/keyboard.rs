//! Level-sampled direction input for terminal environments.
//!
//! Terminals report key presses, not key levels. A direction counts as held
//! from its last press or auto-repeat event until a release event arrives or,
//! for terminals without release events, until a short timeout runs out.
//!
//! A press is latched until the game has sampled it once, so a tap whose
//! release arrives before the next tick still registers.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use tracing::{debug, trace};

use crate::map::{command_for_key, direction_for_key, Command};
use crate::types::Direction;
use tiny_tetris_core::InputSource;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which directions are currently held down.
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    last_press: [Option<Instant>; 4],
    // Pressed since the last sample.
    unsampled: [bool; 4],
    // Released before the press was sampled.
    release_pending: [bool; 4],
    key_release_timeout: Duration,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            last_press: [None; 4],
            unsampled: [false; 4],
            release_pending: [false; 4],
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout.as_millis() as u64
    }

    /// Feed one key event observed at `now`.
    ///
    /// Returns a session command for quit/restart keys. Commands only trigger
    /// on the initial press, never on auto-repeat.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Command> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(direction) = direction_for_key(key.code) {
                    let i = direction.index();
                    self.last_press[i] = Some(now);
                    self.unsampled[i] = true;
                    self.release_pending[i] = false;
                    return None;
                }
                if key.kind == KeyEventKind::Press {
                    return command_for_key(key);
                }
                None
            }
            KeyEventKind::Release => {
                if let Some(direction) = direction_for_key(key.code) {
                    let i = direction.index();
                    if self.unsampled[i] {
                        self.release_pending[i] = true;
                    } else {
                        self.last_press[i] = None;
                    }
                }
                None
            }
        }
    }

    /// Level of `direction` as seen at `now`, without consuming a latched press.
    pub fn is_released_at(&self, direction: Direction, now: Instant) -> bool {
        let i = direction.index();
        if self.unsampled[i] {
            return false;
        }
        match self.last_press[i] {
            None => true,
            Some(pressed) => now.saturating_duration_since(pressed) > self.key_release_timeout,
        }
    }

    /// Read the level of `direction` at `now` and consume a latched press.
    ///
    /// A press reads as held at least once, even if its release already arrived.
    pub fn sample_at(&mut self, direction: Direction, now: Instant) -> bool {
        let i = direction.index();
        if std::mem::take(&mut self.unsampled[i]) {
            if std::mem::take(&mut self.release_pending[i]) {
                self.last_press[i] = None;
            }
            return false;
        }
        self.is_released_at(direction, now)
    }

    /// Drain every pending terminal event without blocking.
    ///
    /// Stops early and returns the command if a quit or restart key was pressed.
    pub fn drain_events(&mut self) -> io::Result<Option<Command>> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            trace!(code = ?key.code, kind = ?key.kind, "key event");
            if let Some(command) = self.handle_key_event(key, Instant::now()) {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.last_press = [None; 4];
        self.unsampled = [false; 4];
        self.release_pending = [false; 4];
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardInput {
    fn is_released(&mut self, direction: Direction) -> bool {
        self.sample_at(direction, Instant::now())
    }
}

/// Ask the terminal to report key release events.
///
/// Returns `false` when the terminal cannot; the release timeout then stands in.
/// Must be called after raw mode is enabled.
pub fn enable_key_release_events(out: &mut impl Write) -> io::Result<bool> {
    if !crossterm::terminal::supports_keyboard_enhancement()? {
        debug!("terminal has no key release events; using release timeout");
        return Ok(false);
    }
    crossterm::execute!(
        out,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )?;
    Ok(true)
}

pub fn disable_key_release_events(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(out, PopKeyboardEnhancementFlags)
}
