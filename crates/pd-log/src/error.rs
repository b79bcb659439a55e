//! Error types for the log pipeline.

use thiserror::Error;

/// Errors returned to callers of [`crate::LogPipeline::emit`].
///
/// Formatting problems never show up here; the pipeline handles them by
/// writing a flagged fallback line.
#[derive(Error, Debug)]
pub enum LogError {
    /// Writing to the sink failed.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    /// A pipeline name that would be read as part of a `key=value` pair.
    #[error("invalid logger name {name:?}: {reason}")]
    InvalidLoggerName { name: String, reason: &'static str },
}

/// Errors a [`crate::Formatter`] may report.
///
/// Messages must describe the failure without quoting the record, since the
/// record may hold unredacted data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The formatter could not render the record.
    #[error("render failed: {0}")]
    Render(String),

    /// The formatter panicked while rendering.
    #[error("formatter panicked")]
    Panicked,
}
