//! Configuration loading
//!
//! The escalation policy ships inside the executable (`config.toml` next to
//! this crate's manifest). An operator can point `--config` or
//! `UPTIME_GUARD_CONFIG` at a file to override it. Either way the document is
//! parsed once at startup and never changes during a run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The configuration bundled at build time
pub const BUNDLED_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level uptime guard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    pub thresholds: Thresholds,
    pub restart: RestartConfig,
}

/// Uptime thresholds in whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warning_days: u64,
    pub critical_days: u64,
}

/// Restart section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartConfig {
    #[serde(default = "default_countdown")]
    pub countdown_minutes: u32,
    pub command: CommandLine,
}

fn default_countdown() -> u32 {
    5
}

/// A program plus its arguments
///
/// Accepts either a single string, split on whitespace, or an explicit
/// array when an argument contains spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommandLine")]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommandLine {
    Line(String),
    Argv(Vec<String>),
}

impl TryFrom<RawCommandLine> for CommandLine {
    type Error = String;

    fn try_from(raw: RawCommandLine) -> Result<Self, Self::Error> {
        let parts: Vec<String> = match raw {
            RawCommandLine::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            RawCommandLine::Argv(argv) => argv,
        };
        let mut parts = parts.into_iter();
        match parts.next() {
            Some(program) if !program.trim().is_empty() => Ok(CommandLine {
                program,
                args: parts.collect(),
            }),
            _ => Err("restart command is empty".to_string()),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl GuardConfig {
    /// Load from `path` if given, otherwise from the bundled document
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                tracing::debug!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&content)
            }
            None => Self::bundled(),
        }
    }

    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml(BUNDLED_CONFIG)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GuardConfig = toml::from_str(content)?;
        config.warn_on_inverted_thresholds();
        Ok(config)
    }

    /// Inverted thresholds are accepted; the forced restart wins from the
    /// critical threshold upwards and the advisory never shows.
    fn warn_on_inverted_thresholds(&self) {
        let t = self.thresholds;
        if t.critical_days < t.warning_days {
            tracing::warn!(
                warning_days = t.warning_days,
                critical_days = t.critical_days,
                "critical threshold is below the warning threshold; the advisory phase will be skipped"
            );
        }
    }
}
