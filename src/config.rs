//! Command line options

use bevy::log::Level;
use clap::{Parser, ValueEnum};

use crate::gallery::selection::AnimationSelector;

#[derive(Parser, Debug)]
#[command(name = "canvas_gallery", about = "A gallery of decorative 2D animations")]
pub struct Cli {
    /// Animation to show first: a 1-based index, part of a title, or a query like `?animation=aurora`
    #[arg(long, short)]
    pub animation: Option<AnimationSelector>,

    /// Seed for every animation's random number generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

impl Cli {
    pub fn selector(&self) -> AnimationSelector {
        self.animation.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
