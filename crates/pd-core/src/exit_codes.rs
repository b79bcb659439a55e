//! Exit codes for the pd CLI.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

/// Exit codes for pd operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Verification ran and the password did not match
    Mismatch = 1,

    /// Invalid arguments (bad field names, separator, redaction text)
    ArgsError = 10,

    /// Invalid configuration value in the environment
    ConfigError = 11,

    /// Row source missing, unreadable or malformed
    InputError = 12,

    /// Output sink failed
    OutputError = 13,

    /// Hashing failed
    InternalError = 20,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}
