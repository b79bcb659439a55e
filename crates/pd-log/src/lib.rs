//! Redacting log formatter and single-sink pipeline.
//!
//! A [`LogPipeline`] is a named logger with a severity threshold, exactly one
//! sink and exactly one [`Formatter`]. The standard formatter,
//! [`RedactingFormatter`], renders
//! `[HOLBERTON] <logger> <LEVEL> <timestamp>: <message>` and then redacts the
//! values of sensitive `key=value;` fields in the whole line.
//!
//! # Usage
//!
//! ```no_run
//! use pd_log::LogPipeline;
//!
//! let logger = LogPipeline::user_data(std::io::stderr());
//! logger.info("name=Bob; email=bob@dylan.com; ip=10.0.0.1;").unwrap();
//! // [HOLBERTON] user_data INFO 2019-11-19 18:24:25,105: name=***; email=***; ip=10.0.0.1;
//! ```
//!
//! # Design Notes
//!
//! - No global registry: callers hold the pipeline and pass it by reference.
//! - Logger names never contain `=`, whitespace or the separator, so the
//!   line prefix cannot swallow the first field.
//! - A failing formatter never breaks the caller; a line marked
//!   `[REDACTION-FAILED]` with the message withheld is written instead.
//! - The pipeline is also a `tracing_subscriber` layer.

pub mod error;
pub mod formatter;
pub mod layer;
pub mod pipeline;
pub mod record;
pub mod sink;

pub use error::{FormatError, LogError};
pub use formatter::{BaseFormatter, Formatter, RedactingFormatter, DEFAULT_TAG};
pub use pipeline::{LogPipeline, LogPipelineBuilder, FALLBACK_MARKER, USER_DATA_LOGGER};
pub use record::{check_logger_name, Level, LogRecord, TIMESTAMP_FORMAT};
pub use sink::{BoxedSink, MemorySink};
