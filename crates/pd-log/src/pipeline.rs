//! Named logger with one sink and one formatter.
//!
//! A [`LogPipeline`] is an ordinary value: build it once, pass it by
//! reference to whoever logs. Nothing is registered globally, so records never
//! propagate to any process-wide subscriber.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crate::error::{FormatError, LogError};
use crate::formatter::{Formatter, RedactingFormatter};
use crate::record::{check_logger_name, Level, LogRecord};
use crate::sink::{self, BoxedSink};
use pd_redact::DEFAULT_SEPARATOR;

/// Name of the pipeline that carries user rows.
pub const USER_DATA_LOGGER: &str = "user_data";

/// Marker opening a line written because the formatter failed.
pub const FALLBACK_MARKER: &str = "[REDACTION-FAILED]";

/// A named logger with a severity threshold, one sink and one formatter.
pub struct LogPipeline {
    name: String,
    threshold: Level,
    formatter: Arc<dyn Formatter>,
    sink: Mutex<BoxedSink>,
}

impl LogPipeline {
    /// Start building a pipeline called `name`.
    ///
    /// The name is checked by [`LogPipelineBuilder::build`].
    pub fn builder(name: impl Into<String>) -> LogPipelineBuilder {
        LogPipelineBuilder {
            name: name.into(),
            threshold: Level::Info,
            formatter: None,
            sink: None,
        }
    }

    /// The standard PII pipeline: `user_data`, `INFO`, PII fields redacted.
    pub fn user_data(sink: impl Write + Send + 'static) -> Self {
        Self::builder(USER_DATA_LOGGER).sink(sink).assemble()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Whether records at `level` reach the sink.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Log `message` at `level` under this pipeline's name.
    pub fn emit(&self, level: Level, message: &str) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.log(&LogRecord::new(self.name.as_str(), level, message))
    }

    /// Format and write a prepared record.
    ///
    /// The record's own logger name is kept. Records below the threshold are
    /// dropped. A formatter failure is never returned: a flagged fallback line
    /// with the message withheld is written instead. That includes a record
    /// whose logger name the redacting formatter refuses.
    pub fn log(&self, record: &LogRecord) -> Result<(), LogError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        let line = self.render(record);
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(sink, "{}", line)?;
        sink.flush()?;
        Ok(())
    }

    fn render(&self, record: &LogRecord) -> String {
        let formatted = panic::catch_unwind(AssertUnwindSafe(|| self.formatter.format(record)))
            .unwrap_or(Err(FormatError::Panicked));
        match formatted {
            Ok(line) => line,
            Err(err) => fallback_line(record, &err),
        }
    }

    pub fn debug(&self, message: &str) -> Result<(), LogError> {
        self.emit(Level::Debug, message)
    }

    pub fn info(&self, message: &str) -> Result<(), LogError> {
        self.emit(Level::Info, message)
    }

    pub fn warning(&self, message: &str) -> Result<(), LogError> {
        self.emit(Level::Warning, message)
    }

    pub fn error(&self, message: &str) -> Result<(), LogError> {
        self.emit(Level::Error, message)
    }

    pub fn critical(&self, message: &str) -> Result<(), LogError> {
        self.emit(Level::Critical, message)
    }
}

impl std::fmt::Debug for LogPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPipeline")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Minimal line for a record the formatter could not handle.
///
/// Carries only metadata and the failure reason, never the message.
fn fallback_line(record: &LogRecord, err: &FormatError) -> String {
    format!(
        "{} {} {} {}: message withheld ({})",
        FALLBACK_MARKER,
        record.logger,
        record.level,
        record.formatted_timestamp(),
        err
    )
}

/// Builder for [`LogPipeline`].
pub struct LogPipelineBuilder {
    name: String,
    threshold: Level,
    formatter: Option<Arc<dyn Formatter>>,
    sink: Option<BoxedSink>,
}

impl LogPipelineBuilder {
    /// Minimum level that reaches the sink (default `INFO`).
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// The single output sink (default stderr). Replaces any earlier sink.
    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// The single formatter (default: PII redaction). Replaces any earlier one.
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Finish the pipeline.
    ///
    /// Fails when the name is empty or contains `=`, whitespace or `;`:
    /// such a name would be read as part of the first `key=value` pair of
    /// every line and shield it from redaction.
    pub fn build(self) -> Result<LogPipeline, LogError> {
        if let Err(reason) = check_logger_name(&self.name, DEFAULT_SEPARATOR) {
            return Err(LogError::InvalidLoggerName {
                name: self.name,
                reason,
            });
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> LogPipeline {
        LogPipeline {
            name: self.name,
            threshold: self.threshold,
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(RedactingFormatter::pii())),
            sink: Mutex::new(self.sink.unwrap_or_else(sink::stderr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::BaseFormatter;
    use crate::sink::MemorySink;
    use pd_redact::FieldSet;

    #[test]
    fn test_user_data_pipeline() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::user_data(sink.clone());
        assert_eq!(pipeline.name(), "user_data");
        assert_eq!(pipeline.threshold(), Level::Info);

        pipeline.info("name=Bob; ip=1.2.3.4;").unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[HOLBERTON] user_data INFO "));
        assert!(lines[0].ends_with(": name=***; ip=1.2.3.4;"));
    }

    #[test]
    fn test_threshold_drops_lower_levels() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::user_data(sink.clone());

        pipeline.debug("name=Bob;").unwrap();
        assert!(sink.contents().is_empty());

        pipeline.warning("name=Bob;").unwrap();
        pipeline.critical("name=Bob;").unwrap();
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" WARNING "));
        assert!(lines[1].contains(" CRITICAL "));
    }

    #[test]
    fn test_custom_formatter_and_fields() {
        let sink = MemorySink::new();
        let formatter = RedactingFormatter::new(FieldSet::new(["ip"]).unwrap()).unwrap();
        let pipeline = LogPipeline::builder("audit")
            .threshold(Level::Debug)
            .formatter(formatter)
            .sink(sink.clone())
            .build()
            .unwrap();

        pipeline.debug("name=Bob; ip=1.2.3.4;").unwrap();
        assert!(sink.contents().contains("[HOLBERTON] audit DEBUG "));
        assert!(sink.contents().contains(": name=Bob; ip=***;"));
    }

    #[test]
    fn test_unredacted_base_formatter() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::builder("plain")
            .formatter(BaseFormatter::default())
            .sink(sink.clone())
            .build()
            .unwrap();
        pipeline.info("name=Bob;").unwrap();
        assert!(sink.contents().contains("name=Bob;"));
    }

    struct Failing;
    impl Formatter for Failing {
        fn format(&self, _record: &LogRecord) -> Result<String, FormatError> {
            Err(FormatError::Render("bad template".to_string()))
        }
    }

    struct Panicking;
    impl Formatter for Panicking {
        fn format(&self, _record: &LogRecord) -> Result<String, FormatError> {
            panic!("formatter bug")
        }
    }

    #[test]
    fn test_formatter_error_writes_flagged_fallback() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::builder("user_data")
            .formatter(Failing)
            .sink(sink.clone())
            .build()
            .unwrap();

        assert!(pipeline.info("ssn=123-45-6789;").is_ok());

        let out = sink.contents();
        assert!(out.starts_with("[REDACTION-FAILED] user_data INFO "));
        assert!(out.contains("message withheld (render failed: bad template)"));
        assert!(!out.contains("123-45-6789"));
    }

    #[test]
    fn test_formatter_panic_is_contained() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::builder("user_data")
            .formatter(Panicking)
            .sink(sink.clone())
            .build()
            .unwrap();

        assert!(pipeline.error("password=hunter2;").is_ok());

        let out = sink.contents();
        assert!(out.starts_with(FALLBACK_MARKER));
        assert!(out.contains("formatter panicked"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_sink_error_is_returned() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let pipeline = LogPipeline::builder("user_data").sink(Closed).build().unwrap();
        assert!(matches!(pipeline.info("x=1;"), Err(LogError::Sink(_))));
    }

    #[test]
    fn test_builder_rejects_names_that_merge_with_a_pair() {
        for name in ["svc=users", "a;b", "user data", ""] {
            let err = LogPipeline::builder(name)
                .sink(MemorySink::new())
                .build()
                .unwrap_err();
            assert!(matches!(err, LogError::InvalidLoggerName { .. }), "{}", name);
        }
    }

    #[test]
    fn test_record_with_bad_logger_name_is_withheld() {
        let sink = MemorySink::new();
        let pipeline = LogPipeline::user_data(sink.clone());

        pipeline
            .log(&LogRecord::new("svc=users", Level::Info, "name=Bob; email=bob@x.com;"))
            .unwrap();

        let out = sink.contents();
        assert!(out.starts_with("[REDACTION-FAILED] svc=users INFO "));
        assert!(!out.contains("Bob"));
        assert!(!out.contains("bob@x.com"));
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogPipeline>();
    }
}
