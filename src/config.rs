//! Runtime configuration.
//!
//! Defaults come from the fixed game constants. Environment variables override
//! the defaults and command line flags override the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use thiserror::Error;

use crate::types::{FALL_INTERVAL_MS, TICK_MS};

pub const ENV_SEED: &str = "TINY_TETRIS_SEED";
pub const ENV_FALL_MS: &str = "TINY_TETRIS_FALL_MS";
pub const ENV_TICK_MS: &str = "TINY_TETRIS_TICK_MS";
pub const ENV_SOUND: &str = "TINY_TETRIS_SOUND";
pub const ENV_MUSIC: &str = "TINY_TETRIS_MUSIC";
pub const ENV_LOG_PATH: &str = "TINY_TETRIS_LOG_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: expected on/off, got {value:?}")]
    InvalidSwitch { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Command line flags.
#[derive(Parser, Debug, Default)]
#[command(version, about = "Falling-block puzzle on a 240x240 panel, in your terminal")]
pub struct Args {
    /// Seed for the piece sequence (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Gravity interval in milliseconds
    #[arg(long)]
    pub fall_ms: Option<u64>,

    /// Main loop tick in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Silence every tone
    #[arg(long)]
    pub mute: bool,

    /// Loop background music
    #[arg(long)]
    pub music: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u32>,
    pub fall_interval_ms: u64,
    pub tick_ms: u64,
    pub sound: bool,
    pub music: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fall_interval_ms: FALL_INTERVAL_MS as u64,
            tick_ms: TICK_MS as u64,
            sound: true,
            music: false,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults, then the process environment, then `args`.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())?.with_args(args)
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = get(ENV_SEED) {
            config.seed = Some(parse_number(ENV_SEED, &v)?);
        }
        if let Some(v) = get(ENV_FALL_MS) {
            config.fall_interval_ms = parse_number(ENV_FALL_MS, &v)?;
        }
        if let Some(v) = get(ENV_TICK_MS) {
            config.tick_ms = parse_number(ENV_TICK_MS, &v)?;
        }
        if let Some(v) = get(ENV_SOUND) {
            config.sound = parse_switch(ENV_SOUND, &v)?;
        }
        if let Some(v) = get(ENV_MUSIC) {
            config.music = parse_switch(ENV_MUSIC, &v)?;
        }
        if let Some(v) = get(ENV_LOG_PATH) {
            config.log_path = Some(PathBuf::from(v));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_args(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(ms) = args.fall_ms {
            self.fall_interval_ms = ms;
        }
        if let Some(ms) = args.tick_ms {
            self.tick_ms = ms;
        }
        if args.mute {
            self.sound = false;
        }
        if args.music {
            self.music = true;
        }
        if let Some(path) = &args.log_file {
            self.log_path = Some(path.clone());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("fall interval"));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick interval"));
        }
        Ok(())
    }

    /// The configured seed, or one taken from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1);
            (nanos ^ (nanos >> 32)) as u32
        })
    }
}

fn parse_number<N: FromStr>(var: &'static str, value: &str) -> Result<N, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_switch(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSwitch {
            var,
            value: value.to_string(),
        }),
    }
}
