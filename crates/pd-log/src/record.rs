//! Log records and severity levels.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in rendered lines, e.g. `2019-11-19 18:24:25,105`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case name as it appears in rendered lines.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "fatal" => Ok(Level::Critical),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            _ => Level::Error,
        }
    }
}

/// Check that `name` can appear in a rendered line without being taken for
/// part of a `key=value` pair.
///
/// Returns the reason the name is rejected.
pub fn check_logger_name(name: &str, separator: char) -> Result<(), &'static str> {
    if name.is_empty() {
        Err("must not be empty")
    } else if name.contains('=') {
        Err("must not contain '='")
    } else if name.contains(separator) {
        Err("must not contain the separator")
    } else if name.chars().any(char::is_whitespace) {
        Err("must not contain whitespace")
    } else {
        Ok(())
    }
}

/// A single logging call, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub logger: String,
    pub level: Level,
    pub timestamp: DateTime<Local>,
    /// The raw, unredacted message.
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            level,
            timestamp: Local::now(),
            message: message.into(),
        }
    }

    /// Replace the timestamp.
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Warning.to_string(), "WARNING");
        assert_eq!(Level::Critical.name(), "CRITICAL");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_from_tracing() {
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warning);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn test_check_logger_name() {
        assert!(check_logger_name("user_data", ';').is_ok());
        assert!(check_logger_name("user_data.audit", ';').is_ok());
        assert_eq!(check_logger_name("svc=users", ';'), Err("must not contain '='"));
        assert!(check_logger_name("a;b", ';').is_err());
        assert!(check_logger_name("a|b", '|').is_err());
        assert!(check_logger_name("two words", ';').is_err());
        assert!(check_logger_name("", ';').is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let naive = NaiveDate::from_ymd_opt(2019, 11, 19)
            .unwrap()
            .and_hms_milli_opt(18, 24, 25, 105)
            .unwrap();
        let ts = Local.from_local_datetime(&naive).single().unwrap();
        let record = LogRecord::new("user_data", Level::Info, "x").at(ts);
        assert_eq!(record.formatted_timestamp(), "2019-11-19 18:24:25,105");
    }
}
