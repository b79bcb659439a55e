//! Record formatting.
//!
//! Formatting is built by composition: [`BaseFormatter`] renders the fixed
//! line layout, and [`RedactingFormatter`] wraps any base formatter and runs
//! the rendered text through a [`RedactionEngine`].

use crate::error::FormatError;
use crate::record::{check_logger_name, LogRecord};
use pd_redact::{FieldSet, RedactionEngine, RedactionSpec, Result as RedactResult};

/// Tag that opens every rendered line.
pub const DEFAULT_TAG: &str = "[HOLBERTON]";

/// Turns a record into a single line of text (without line terminator).
///
/// Implementations must be stateless across calls so one instance can serve
/// every record, from any thread.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String, FormatError>;
}

/// Renders `<tag> <logger> <LEVEL> <timestamp>: <message>`.
#[derive(Debug, Clone)]
pub struct BaseFormatter {
    tag: String,
}

impl BaseFormatter {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn render(&self, record: &LogRecord) -> String {
        format!(
            "{} {} {} {}: {}",
            self.tag,
            record.logger,
            record.level,
            record.formatted_timestamp(),
            record.message
        )
    }
}

impl Default for BaseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl Formatter for BaseFormatter {
    fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
        Ok(self.render(record))
    }
}

/// Renders with a base formatter, then redacts the whole line.
///
/// Redaction runs over the full rendered line, prefix included, so a
/// sensitive `key=value` pair is caught wherever it lands. A record whose
/// logger name could merge with the first pair is refused.
#[derive(Debug, Clone)]
pub struct RedactingFormatter<B = BaseFormatter> {
    base: B,
    engine: RedactionEngine,
}

impl RedactingFormatter<BaseFormatter> {
    /// Redact `fields` using `***` and `;`.
    pub fn new(fields: FieldSet) -> RedactResult<Self> {
        let spec = RedactionSpec::with_fields(fields)?;
        Ok(Self::with_base(BaseFormatter::default(), RedactionEngine::new(spec)))
    }

    /// Redact the default PII fields.
    pub fn pii() -> Self {
        Self::with_base(BaseFormatter::default(), RedactionEngine::pii())
    }
}

impl<B: Formatter> RedactingFormatter<B> {
    /// Wrap any base formatter with an engine.
    pub fn with_base(base: B, engine: RedactionEngine) -> Self {
        Self { base, engine }
    }

    pub fn fields(&self) -> &FieldSet {
        self.engine.spec().fields()
    }
}

impl Default for RedactingFormatter<BaseFormatter> {
    fn default() -> Self {
        Self::pii()
    }
}

impl<B: Formatter> Formatter for RedactingFormatter<B> {
    fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
        check_logger_name(&record.logger, self.engine.spec().separator())
            .map_err(|reason| FormatError::Render(format!("logger name {}", reason)))?;
        let rendered = self.base.format(record)?;
        Ok(self.engine.filter(&rendered))
    }
}
