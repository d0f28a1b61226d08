//! Severity scale.
//!
//! Levels are ordered by increasing restrictiveness. `Quiet` is only ever
//! used as a threshold: it sits above every printable level, so a logger
//! configured with it emits nothing.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Log severity, ordered `Debug < Info < Warn < Error < Quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Most permissive; the threshold a prefixed logger starts at.
    #[default]
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
    /// Threshold-only value that suppresses all emission.
    Quiet,
}

impl Level {
    /// Printable severities, in ascending order.
    pub const EMITTABLE: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

    /// Decorated tag used at the start of every log line.
    ///
    /// `Quiet` has no tag of its own and renders as `[UNKNOWN]`.
    pub fn tag(self) -> String {
        match self {
            Level::Debug => "[DEBUG]".bright_cyan().bold().to_string(),
            Level::Info => "[INFO]".bright_blue().bold().to_string(),
            Level::Warn => "[WARN]".yellow().bold().to_string(),
            Level::Error => "[ERROR]".red().bold().to_string(),
            Level::Quiet => "[UNKNOWN]".to_string(),
        }
    }

    /// Lowercase name, as accepted by [`Level::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Quiet => "quiet",
        }
    }

    /// Equivalent `tracing` filter. `Quiet` maps to `OFF`.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error => LevelFilter::ERROR,
            Level::Quiet => LevelFilter::OFF,
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`, expected one of debug, info, warn, error, quiet")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "quiet" | "off" => Ok(Level::Quiet),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
