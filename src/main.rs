//! Terminal runner (default binary).
//!
//! Emulates the 240×240 panel in the terminal, reads the keyboard through
//! crossterm and rings the bell for tones.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiny_tetris::core::{GameEngine, RandomPieces, SharedRenderer, ToneDevice};
use tiny_tetris::input::{
    disable_key_release_events, enable_key_release_events, Command, KeyboardInput,
};
use tiny_tetris::term::{SilentTone, TerminalBell, TerminalDisplay};
use tiny_tetris::{Args, AudioSystem, GameConfig, GameLoop};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::load(&args).context("invalid configuration")?;
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let display = SharedRenderer::new(TerminalDisplay::stdout());
    display.with(|d| d.terminal_mut().enter())?;
    let release_events = enable_key_release_events(&mut io::stdout()).unwrap_or(false);

    let result = run(&config, display.clone());

    // Always try to restore terminal state.
    if release_events {
        let _ = disable_key_release_events(&mut io::stdout());
    }
    let _ = display.with(|d| d.terminal_mut().exit());
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(config: &GameConfig, display: SharedRenderer<TerminalDisplay>) -> Result<()> {
    // Keep the audio runtime alive for the whole session.
    let audio = if config.sound {
        Some(AudioSystem::start(TerminalBell::new(), config.music)?)
    } else {
        None
    };
    let tone: Box<dyn ToneDevice> = match &audio {
        Some(audio) => Box::new(audio.queue()),
        None => Box::new(SilentTone),
    };

    let seed = config.seed_or_clock();
    info!(
        seed,
        fall_ms = config.fall_interval_ms,
        tick_ms = config.tick_ms,
        "starting"
    );
    let engine =
        GameEngine::with_fall_interval(RandomPieces::new(seed), config.fall_interval_ms);
    let mut game = GameLoop::new(engine, display, tone);
    let mut input = KeyboardInput::new();

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let tick = Duration::from_millis(config.tick_ms);

    game.start(now_ms())?;
    loop {
        let tick_start = Instant::now();

        match input.drain_events().context("failed to read terminal input")? {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                input.reset();
                game.restart(now_ms())?;
            }
            None => {}
        }

        game.tick(&mut input, now_ms())?;

        if let Some(rest) = tick.checked_sub(tick_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    let state = game.engine().state();
    info!(
        lines = state.lines_cleared(),
        pieces = state.pieces_locked(),
        resets = state.board_resets(),
        "quit"
    );
    if audio.as_ref().is_some_and(|a| !a.is_running()) {
        warn!("audio stopped early");
    }
    Ok(())
}
