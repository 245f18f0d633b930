//! Collaborator interfaces: direction inputs, display and tone output.
//!
//! The engine only ever reads an [`InputSource`]. Drawing and sound are left
//! to the caller, which turns a tick report into [`Renderer`] and
//! [`ToneDevice`] calls.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::render::Image;
use crate::types::{Direction, Rgb, SOFT_DROP_TONE_HZ, SOFT_DROP_TONE_MS};

/// Level-sampled direction inputs.
pub trait InputSource {
    /// `true` while the direction is not pressed.
    fn is_released(&mut self, direction: Direction) -> bool;
}

/// Fixed-resolution display.
pub trait Renderer {
    fn fill_screen(&mut self, color: Rgb) -> Result<()>;

    /// Copy `image` to the display with its top-left corner at (x, y).
    fn draw_region(&mut self, x: u16, y: u16, image: &Image) -> Result<()>;

    /// Make everything drawn so far visible.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Single-bit audio output.
pub trait ToneDevice {
    /// Start a square-wave tone. Callers never wait for it to finish.
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

/// A tone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Tone {
    /// Click played after a successful soft drop
    pub const SOFT_DROP: Tone = Tone::new(SOFT_DROP_TONE_HZ, SOFT_DROP_TONE_MS);

    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// A silent note of the given length
    pub const fn rest(duration_ms: u32) -> Self {
        Self::new(0, duration_ms)
    }

    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn is_released(&mut self, direction: Direction) -> bool {
        (**self).is_released(direction)
    }
}

impl<T: ToneDevice + ?Sized> ToneDevice for Box<T> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        (**self).play_tone(frequency_hz, duration_ms)
    }
}

/// Renderer handle that several tasks can draw through.
///
/// Every call takes the lock, draws, and releases it again, so frames from
/// different tasks never interleave inside a single call. Nobody keeps the
/// lock between calls.
pub struct SharedRenderer<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> SharedRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(renderer)),
        }
    }

    /// Run `f` with exclusive access to the renderer.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> Result<T>) -> Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow!("renderer lock poisoned"))?;
        f(&mut guard)
    }
}

impl<R> Clone for SharedRenderer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Renderer> Renderer for SharedRenderer<R> {
    fn fill_screen(&mut self, color: Rgb) -> Result<()> {
        self.with(|r| r.fill_screen(color))
    }

    fn draw_region(&mut self, x: u16, y: u16, image: &Image) -> Result<()> {
        self.with(|r| r.draw_region(x, y, image))
    }

    fn present(&mut self) -> Result<()> {
        self.with(|r| r.present())
    }
}
