//! TerminalDisplay: a fixed-resolution pixel panel emulated in a terminal.
//!
//! Drawing goes into a pixel canvas the size of the physical panel. On
//! [`present`](Renderer::present) every terminal cell samples the centre pixel of
//! its block and shows it as a background colour; the resulting framebuffer is
//! diffed and flushed by [`TerminalRenderer`].

use std::io::{self, Write};

use anyhow::Result;
use tracing::trace;

use crate::core::{board_origin, Image, Renderer};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;
use crate::types::{BLOCK_SIZE, DISPLAY_HEIGHT, DISPLAY_WIDTH, SCREEN_BACKGROUND};

pub const DEFAULT_FOOTER: &str = "arrows/hjkl/wasd  r restart  q quit";

/// Pixels covered by one terminal cell.
///
/// The default 6×12 maps one 12 px block to two columns by one row, which
/// roughly squares it up on a typical terminal font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPixels {
    pub width: u16,
    pub height: u16,
}

impl Default for CellPixels {
    fn default() -> Self {
        Self {
            width: BLOCK_SIZE / 2,
            height: BLOCK_SIZE,
        }
    }
}

pub struct TerminalDisplay<W: Write = io::Stdout> {
    canvas: Image,
    cell: CellPixels,
    fb: FrameBuffer,
    term: TerminalRenderer<W>,
    viewport: Option<(u16, u16)>,
    follow_terminal_size: bool,
    footer: Option<String>,
}

impl TerminalDisplay<io::Stdout> {
    /// 240×240 panel on stdout, centred in the current terminal window.
    pub fn stdout() -> Self {
        let mut display = Self::new(TerminalRenderer::new(), DISPLAY_WIDTH, DISPLAY_HEIGHT)
            .with_footer(DEFAULT_FOOTER);
        display.follow_terminal_size = true;
        display
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(term: TerminalRenderer<W>, width: u16, height: u16) -> Self {
        Self {
            canvas: Image::new(width, height, SCREEN_BACKGROUND),
            cell: CellPixels::default(),
            fb: FrameBuffer::new(0, 0),
            term,
            viewport: None,
            follow_terminal_size: false,
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Pin the terminal size instead of querying it.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Some((width, height));
        self.follow_terminal_size = false;
    }

    pub fn canvas(&self) -> &Image {
        &self.canvas
    }

    pub fn terminal(&self) -> &TerminalRenderer<W> {
        &self.term
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.term
    }

    /// Terminal cells needed for the panel, not counting the footer.
    pub fn panel_cells(&self) -> (u16, u16) {
        (
            self.canvas.width().div_ceil(self.cell.width),
            self.canvas.height().div_ceil(self.cell.height),
        )
    }

    fn footer_rows(&self) -> u16 {
        u16::from(self.footer.is_some())
    }

    fn viewport_size(&self) -> (u16, u16) {
        let (cols, rows) = self.panel_cells();
        let fallback = (cols, rows + self.footer_rows());
        if self.follow_terminal_size {
            return crossterm::terminal::size().unwrap_or(fallback);
        }
        self.viewport.unwrap_or(fallback)
    }

    /// Sample the canvas into the framebuffer for the given terminal size.
    pub fn compose(&mut self, viewport: (u16, u16)) -> &FrameBuffer {
        let (vw, vh) = viewport;
        let (cols, rows) = self.panel_cells();
        let (ox, oy) = board_origin(vw, vh, cols, rows + self.footer_rows());

        self.fb.resize(vw, vh);
        self.fb.clear(CellStyle::solid(SCREEN_BACKGROUND).into_cell(' '));

        for row in 0..rows {
            let py = (row * self.cell.height + self.cell.height / 2)
                .min(self.canvas.height().saturating_sub(1));
            for col in 0..cols {
                let px = (col * self.cell.width + self.cell.width / 2)
                    .min(self.canvas.width().saturating_sub(1));
                let color = self.canvas.get(px, py).unwrap_or(SCREEN_BACKGROUND);
                self.fb.set(
                    ox.saturating_add(col),
                    oy.saturating_add(row),
                    CellStyle::solid(color).into_cell(' '),
                );
            }
        }

        if let Some(footer) = &self.footer {
            let style = CellStyle {
                fg: Rgb::new(140, 140, 150),
                bg: SCREEN_BACKGROUND,
                dim: true,
            };
            let len = footer.chars().count() as u16;
            let fx = ox + cols.saturating_sub(len) / 2;
            self.fb.put_str(fx, oy.saturating_add(rows), footer, style);
        }

        &self.fb
    }
}

impl<W: Write> Renderer for TerminalDisplay<W> {
    fn fill_screen(&mut self, color: Rgb) -> Result<()> {
        self.canvas.fill(color);
        Ok(())
    }

    fn draw_region(&mut self, x: u16, y: u16, image: &Image) -> Result<()> {
        for iy in 0..image.height() {
            let Some(cy) = y.checked_add(iy) else { break };
            if cy >= self.canvas.height() {
                break;
            }
            for ix in 0..image.width() {
                let Some(cx) = x.checked_add(ix) else { break };
                if cx >= self.canvas.width() {
                    break;
                }
                if let Some(color) = image.get(ix, iy) {
                    self.canvas.set(cx, cy, color);
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.canvas.width() == 0 || self.canvas.height() == 0 {
            return Ok(());
        }
        let viewport = self.viewport_size();
        self.compose(viewport);
        trace!(width = viewport.0, height = viewport.1, "present frame");
        self.term.draw_swap(&mut self.fb)
    }
}
