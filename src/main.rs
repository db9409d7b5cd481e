//! tui-2048 — the sliding-tile puzzle in the terminal, plus an unattended driver mode.

mod app;
mod driver;
mod engine;
mod grid;
mod input;
mod render;
mod session;
mod spawn;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::{App, Exit};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use session::Session;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{info, warn};

/// Validated game options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub base: u64,
    pub tile_width: usize,
    pub seed: Option<u64>,
    /// 0 = unlimited.
    pub max_driver_steps: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            base: 2,
            tile_width: 4,
            seed: None,
            max_driver_steps: 10_000,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    SizeTooSmall(usize),
    #[error("tile base must be at least 2, got {0}")]
    BaseTooSmall(u64),
    #[error("tile width must be at least 1")]
    ZeroWidth,
    #[error("a {size}x{size} grid in base {base} can reach tiles that overflow 64 bits")]
    Overflow { size: usize, base: u64 },
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let config = Self {
            size: args.size,
            base: args.base,
            tile_width: args.tile_width,
            seed: args.seed,
            max_driver_steps: args.max_driver_steps,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::SizeTooSmall(self.size));
        }
        if self.base < 2 {
            return Err(ConfigError::BaseTooSmall(self.base));
        }
        if self.tile_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        // Largest reachable tile is base^(cells+1); the win check needs base^11.
        let top = u32::try_from(self.size * self.size + 1).ok();
        let fits = top
            .and_then(|e| self.base.checked_pow(e.max(grid::WIN_EXPONENT)))
            .is_some();
        if !fits {
            return Err(ConfigError::Overflow {
                size: self.size,
                base: self.base,
            });
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::from_args(&args)?;
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = load_theme(args.theme.as_deref(), args.palette);

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!(seed, ?config, "starting");
    let session = Session::new(&config, StdRng::seed_from_u64(seed));
    let mut app = App::new(session, theme, config.tile_width);
    let exit = app.run()?;

    let mut stdout = std::io::stdout().lock();
    match exit {
        Exit::Driver => {
            driver::run(
                app.session_mut(),
                &mut stdout,
                config.tile_width,
                config.max_driver_steps,
            )?;
        }
        Exit::Finished(ending) => {
            let session = app.session();
            render::write_final(
                &mut stdout,
                session.grid(),
                ending,
                &session.report(),
                config.tile_width,
            )?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Theme from `path`, or the built-in theme in the chosen palette if it cannot be read.
fn load_theme(path: Option<&Path>, palette: Palette) -> theme::Theme {
    theme::Theme::load(path, palette).unwrap_or_else(|err| {
        warn!(%err, "theme not loaded, using defaults");
        theme::Theme::default_for_palette(palette)
    })
}

/// Nanoseconds since the Unix epoch, folded to 64 bits.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Send tracing output to `path`; the terminal itself is owned by the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// 2048 in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tui-2048",
    version,
    about = "Sliding-tile 2048 in the terminal, with an unattended driver mode.",
    long_about = "Slide tiles on a square grid; equal neighbours merge into one tile worth base times as much. \
        Reach base^11 (2048 in base 2) to win.\n\n\
        At startup press u to play, any other key to run the driver, which cycles up/right/down/left \
        and undoes any move that pushes the tile sum past base^3.\n\n\
        CONTROLS:\n  w/Up  a/Left  s/Down  d/Right   Move\n  n  Next moves preview   v  Stats\n  \
        u  Undo   r  Reset   q / Esc  Quit"
)]
pub struct Args {
    /// Grid dimension (N x N).
    #[arg(long, default_value = "4", value_name = "N")]
    pub size: usize,

    /// Tile base: new tiles are base or base^2, merges multiply by base.
    #[arg(long, default_value = "2", value_name = "P")]
    pub base: u64,

    /// Printed width of each tile.
    #[arg(long, default_value = "4", value_name = "W")]
    pub tile_width: usize,

    /// Seed for the random source (default: the clock).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Driver mode step cap; 0 means unlimited.
    #[arg(long, default_value = "10000", value_name = "K")]
    pub max_driver_steps: u64,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Write tracing logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
