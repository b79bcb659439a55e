//! Diagnostics configuration for the `pd` binary.
//!
//! Precedence, highest first: CLI flags, `PD_LOG` / `PD_LOG_FORMAT`, then the
//! most verbose level named in `RUST_LOG`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Diagnostics output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("human") {
            Ok(LogFormat::Human)
        } else if s.eq_ignore_ascii_case("jsonl") || s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Jsonl)
        } else {
            Err(format!("unknown log format: {} (expected human or jsonl)", s))
        }
    }
}

/// Diagnostics verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

/// Accepts whatever `tracing` accepts for a level filter.
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<LevelFilter>()
            .map(LogLevel::from)
            .map_err(|_| format!("unknown log level: {}", s))
    }
}

impl From<LevelFilter> for LogLevel {
    fn from(filter: LevelFilter) -> Self {
        match filter.into_level() {
            None => LogLevel::Off,
            Some(tracing::Level::TRACE) => LogLevel::Trace,
            Some(tracing::Level::DEBUG) => LogLevel::Debug,
            Some(tracing::Level::INFO) => LogLevel::Info,
            Some(tracing::Level::WARN) => LogLevel::Warn,
            Some(_) => LogLevel::Error,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Diagnostics logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub level: LogLevel,
}

impl LogConfig {
    /// Resolve from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|var| std::env::var(var).ok(), cli_level, cli_format)
    }

    /// Same as [`LogConfig::from_env`] with an explicit variable lookup.
    ///
    /// Unparseable values are ignored.
    pub fn from_lookup<F>(lookup: F, cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_level = match lookup("PD_LOG") {
            Some(val) => val.parse().ok(),
            None => lookup("RUST_LOG").as_deref().and_then(most_verbose_directive),
        };
        let env_format = lookup("PD_LOG_FORMAT").and_then(|val| val.parse().ok());

        LogConfig {
            format: cli_format.or(env_format).unwrap_or_default(),
            level: cli_level.or(env_level).unwrap_or_default(),
        }
    }
}

/// Most verbose level in an `EnvFilter` directive list such as
/// `warn,pd_core=debug`.
fn most_verbose_directive(directives: &str) -> Option<LogLevel> {
    directives
        .split(',')
        .filter_map(|directive| directive.rsplit('=').next())
        .filter_map(|level| level.trim().parse::<LevelFilter>().ok())
        .max()
        .map(LogLevel::from)
}
