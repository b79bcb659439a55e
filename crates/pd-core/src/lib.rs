//! Personal data guard core.
//!
//! Glue between the redaction engine, the secret vault and the log
//! pipeline: configuration from the environment, the user row source, the
//! row message composer and the `pd` command line.
//!
//! # Example
//!
//! ```no_run
//! use pd_core::{compose_message, JsonlSource};
//! use pd_log::LogPipeline;
//! use std::path::Path;
//!
//! let logger = LogPipeline::user_data(std::io::stderr());
//! for row in JsonlSource::open(Path::new("users.jsonl"))? {
//!     logger.info(&compose_message(&row?))?;
//! }
//! # Ok::<(), pd_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod message;
pub mod source;

pub use config::{AppConfig, ConfigError};
pub use error::{Error, Result};
pub use exit_codes::ExitCode;
pub use message::compose_message;
pub use source::{JsonlSource, SourceError, UserRow, USER_COLUMNS};
