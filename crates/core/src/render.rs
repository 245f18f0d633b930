//! Frame composition: maps a [`GameState`] into a pixel image.
//!
//! This module is pure (no I/O). The composed image covers exactly the board's
//! pixel footprint; a [`Renderer`](crate::device::Renderer) places it on the
//! display at the offset returned by [`board_origin`].

use crate::game_state::GameState;
use crate::types::{
    Rgb, BLOCK_SIZE, BOARD_BACKGROUND, BOARD_HEIGHT, BOARD_WIDTH, DISPLAY_HEIGHT, DISPLAY_WIDTH,
    PALETTE,
};

/// Owned RGB pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
}

impl Image {
    pub fn new(width: u16, height: u16, fill: Rgb) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![fill; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Resize the image.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.resize(len, Rgb::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u16, y: u16, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end {
            return;
        }
        for py in y..y_end {
            let start = (py as usize) * (self.width as usize);
            self.pixels[start + x as usize..start + x_end as usize].fill(color);
        }
    }
}

/// Draws the board and the active piece as square blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    block_size: u16,
    background: Rgb,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            background: BOARD_BACKGROUND,
        }
    }
}

impl BoardView {
    pub fn new(block_size: u16) -> Self {
        Self {
            block_size: block_size.max(1),
            ..Self::default()
        }
    }

    pub fn block_size(&self) -> u16 {
        self.block_size
    }

    /// Pixel size of the composed image
    pub fn image_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.block_size,
            (BOARD_HEIGHT as u16) * self.block_size,
        )
    }

    /// Where the image goes on the default 240×240 panel
    pub fn display_origin(&self) -> (u16, u16) {
        let (w, h) = self.image_size();
        board_origin(DISPLAY_WIDTH, DISPLAY_HEIGHT, w, h)
    }

    /// Compose the current state into an existing image.
    ///
    /// Callers can reuse one image across frames; it is only reallocated when
    /// the block size changes.
    pub fn render_into(&self, state: &GameState, image: &mut Image) {
        let (w, h) = self.image_size();
        image.resize(w, h);
        image.fill(self.background);

        let board = state.board();
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match board.get(x, y) {
                    Some(0) | None => {}
                    Some(value) => self.draw_block(image, x, y, value),
                }
            }
        }

        if let Some(active) = state.active() {
            let color = active.color();
            for (x, y) in active.cells() {
                self.draw_block(image, x, y, color);
            }
        }
    }

    /// Convenience helper that allocates a new image.
    pub fn render(&self, state: &GameState) -> Image {
        let (w, h) = self.image_size();
        let mut image = Image::new(w, h, self.background);
        self.render_into(state, &mut image);
        image
    }

    fn draw_block(&self, image: &mut Image, x: i8, y: i8, value: u8) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let Some(&color) = PALETTE.get(value as usize) else {
            return;
        };
        let s = self.block_size;
        image.fill_rect(x as u16 * s, y as u16 * s, s, s, color);
    }
}

/// Compose `state` with square blocks of `block_size` pixels.
pub fn compose_frame(state: &GameState, block_size: u16) -> Image {
    BoardView::new(block_size).render(state)
}

/// Top-left offset that centers an image on the display.
pub fn board_origin(display_w: u16, display_h: u16, image_w: u16, image_h: u16) -> (u16, u16) {
    (
        display_w.saturating_sub(image_w) / 2,
        display_h.saturating_sub(image_h) / 2,
    )
}
