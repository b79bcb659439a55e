//! Top-level error type for the pd binary.

use crate::config::ConfigError;
use crate::exit_codes::ExitCode;
use crate::source::SourceError;
use thiserror::Error;

/// Every failure a `pd` command can end with.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Vault(#[from] pd_vault::VaultError),

    #[error("invalid redaction settings: {0}")]
    Redaction(#[from] pd_redact::RedactionError),

    #[error(transparent)]
    Log(#[from] pd_log::LogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Config(_) => ExitCode::ConfigError,
            Error::Source(_) => ExitCode::InputError,
            Error::Vault(pd_vault::VaultError::InvalidParams(_)) => ExitCode::ConfigError,
            Error::Vault(_) => ExitCode::InternalError,
            Error::Redaction(_) | Error::Log(pd_log::LogError::InvalidLoggerName { .. }) => {
                ExitCode::ArgsError
            }
            Error::Log(_) | Error::Io(_) => ExitCode::OutputError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let err: Error = SourceError::Malformed { line: 3 }.into();
        assert_eq!(err.exit_code(), ExitCode::InputError);

        let err: Error = pd_redact::RedactionError::EmptyFieldName.into();
        assert_eq!(err.exit_code(), ExitCode::ArgsError);

        let err: Error = pd_vault::VaultError::InvalidParams("m too small".into()).into();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);

        let err: Error = pd_log::LogError::InvalidLoggerName {
            name: "a=b".into(),
            reason: "must not contain '='",
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::ArgsError);

        let err: Error = pd_vault::VaultError::HashFailed("rng".into()).into();
        assert_eq!(err.exit_code(), ExitCode::InternalError);
    }
}
