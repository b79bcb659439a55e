//! Diagnostics logging for the `pd` binary.
//!
//! Diagnostics go to stderr, either human-readable or as JSON lines. They
//! are separate from the user-data pipeline in `pd-log`, which has its own
//! sink and is never installed as the global subscriber.
//!
//! Diagnostics must never carry secrets or row values; log counts, paths
//! and outcomes only.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global diagnostics subscriber.
///
/// Call once at startup. A second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .with_env_var("PD_LOG")
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Human => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .try_init(),
        LogFormat::Jsonl => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("diagnostics subscriber already installed");
    }
}
