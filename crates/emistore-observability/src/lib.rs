//! Logging initialization for the EMI storefront.
//!
//! Libraries only emit `tracing` events; binaries call [`init`] once at
//! startup. The filter comes from `RUST_LOG` and falls back to the
//! configured default level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, for log aggregation.
    Json,
    /// Human-readable, for development.
    #[default]
    Human,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log format {0:?} (expected \"json\" or \"human\")")]
pub struct ParseLogFormatError(String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "human" | "pretty" | "text" => Ok(LogFormat::Human),
            other => Err(ParseLogFormatError(other.to_string())),
        }
    }
}

/// Logging setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub default_level: LogLevel,
}

impl LogConfig {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// `RUST_LOG` if set and valid, otherwise the default level.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_level.to_string()))
    }
}

/// Install the global subscriber with the default level.
///
/// Safe to call multiple times; returns `false` when a subscriber was
/// already installed.
pub fn init(format: LogFormat) -> bool {
    init_with(LogConfig::new(format))
}

/// Install the global subscriber. Logs go to stderr so stdout stays free
/// for command output.
pub fn init_with(config: LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Human => builder.with_target(true).try_init(),
    };
    result.is_ok()
}
