//! Binds the engine to its devices.
//!
//! [`GameLoop`] owns the engine, a renderer and a tone sink. Each tick it runs
//! the engine, forwards the tone request, and redraws only when the tick report
//! asks for it. Timing is the caller's job: it passes in a millisecond clock
//! and sleeps between ticks.

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::core::{
    BoardView, GameEngine, Image, InputSource, PieceSource, Renderer, TickReport, ToneDevice,
};
use crate::types::SCREEN_BACKGROUND;

pub struct GameLoop<P, R, T> {
    engine: GameEngine<P>,
    renderer: R,
    tone: T,
    view: BoardView,
    frame: Image,
    frames_drawn: u64,
}

impl<P, R, T> GameLoop<P, R, T>
where
    P: PieceSource,
    R: Renderer,
    T: ToneDevice,
{
    pub fn new(engine: GameEngine<P>, renderer: R, tone: T) -> Self {
        let view = BoardView::default();
        let (w, h) = view.image_size();
        Self {
            engine,
            renderer,
            tone,
            view,
            frame: Image::new(w, h, SCREEN_BACKGROUND),
            frames_drawn: 0,
        }
    }

    pub fn engine(&self) -> &GameEngine<P> {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    /// Frames pushed to the renderer so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Clear the screen, spawn the first piece and draw it.
    pub fn start(&mut self, now_ms: u64) -> Result<TickReport> {
        self.renderer
            .fill_screen(SCREEN_BACKGROUND)
            .context("failed to clear screen")?;
        let report = self.engine.start(now_ms);
        self.draw()?;
        Ok(report)
    }

    /// Start over on an empty board.
    pub fn restart(&mut self, now_ms: u64) -> Result<TickReport> {
        let report = self.engine.restart(now_ms);
        self.draw()?;
        Ok(report)
    }

    /// One pass of the main loop.
    pub fn tick(&mut self, input: &mut impl InputSource, now_ms: u64) -> Result<TickReport> {
        if !self.engine.started() {
            self.renderer
                .fill_screen(SCREEN_BACKGROUND)
                .context("failed to clear screen")?;
        }

        let report = self.engine.tick(input, now_ms);
        if let Some(tone) = report.tone {
            self.tone.play_tone(tone.frequency_hz, tone.duration_ms);
        }
        if report.locked {
            debug!(
                lines = report.lines_cleared,
                total_lines = self.engine.state().lines_cleared(),
                pieces = self.engine.state().pieces_locked(),
                "lock finished"
            );
        }
        if report.render {
            self.draw()?;
        }
        Ok(report)
    }

    fn draw(&mut self) -> Result<()> {
        self.view.render_into(self.engine.state(), &mut self.frame);
        let (x, y) = self.view.display_origin();
        self.renderer
            .draw_region(x, y, &self.frame)
            .context("failed to draw board")?;
        self.renderer.present().context("failed to present frame")?;
        self.frames_drawn += 1;
        trace!(frame = self.frames_drawn, "frame drawn");
        Ok(())
    }
}
