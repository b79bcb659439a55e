//! Application configuration from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `PD_VAULT_MEMORY_KIB` | Argon2id memory cost | 19456 |
//! | `PD_VAULT_ITERATIONS` | Argon2id passes | 3 |
//! | `PD_VAULT_PARALLELISM` | Argon2id lanes | 1 |
//! | `PD_LOGGER_NAME` | name of the row pipeline | `user_data` |
//! | `PERSONAL_DATA_ROWS` | row input path, `-` for stdin | `-` |
//!
//! CLI flags override these values.

use pd_log::{check_logger_name, USER_DATA_LOGGER};
use pd_redact::DEFAULT_SEPARATOR;
use pd_vault::VaultParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_VAULT_MEMORY_KIB: &str = "PD_VAULT_MEMORY_KIB";
pub const ENV_VAULT_ITERATIONS: &str = "PD_VAULT_ITERATIONS";
pub const ENV_VAULT_PARALLELISM: &str = "PD_VAULT_PARALLELISM";
pub const ENV_LOGGER_NAME: &str = "PD_LOGGER_NAME";
pub const ENV_ROWS: &str = "PERSONAL_DATA_ROWS";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Work factor for new password hashes.
    #[serde(default)]
    pub vault: VaultParams,

    /// Name of the pipeline that logs user rows.
    #[serde(default = "default_logger_name")]
    pub logger_name: String,

    /// Where rows are read from.
    #[serde(default = "default_rows")]
    pub rows: PathBuf,
}

fn default_logger_name() -> String {
    USER_DATA_LOGGER.to_string()
}

fn default_rows() -> PathBuf {
    PathBuf::from("-")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vault: VaultParams::default(),
            logger_name: default_logger_name(),
            rows: default_rows(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(v) = lookup(ENV_VAULT_MEMORY_KIB) {
            config.vault.memory_kib = parse_u32(ENV_VAULT_MEMORY_KIB, &v)?;
        }
        if let Some(v) = lookup(ENV_VAULT_ITERATIONS) {
            config.vault.iterations = parse_u32(ENV_VAULT_ITERATIONS, &v)?;
        }
        if let Some(v) = lookup(ENV_VAULT_PARALLELISM) {
            config.vault.parallelism = parse_u32(ENV_VAULT_PARALLELISM, &v)?;
        }

        if let Some(name) = lookup(ENV_LOGGER_NAME) {
            let name = name.trim().to_string();
            check_logger_name(&name, DEFAULT_SEPARATOR).map_err(|reason| {
                ConfigError::InvalidValue {
                    var: ENV_LOGGER_NAME,
                    reason: reason.to_string(),
                }
            })?;
            config.logger_name = name;
        }

        if let Some(path) = lookup(ENV_ROWS) {
            if !path.is_empty() {
                config.rows = PathBuf::from(path);
            }
        }

        Ok(config)
    }
}

fn parse_u32(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logger_name, "user_data");
        assert_eq!(config.rows, PathBuf::from("-"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_VAULT_ITERATIONS, "5"),
            (ENV_VAULT_MEMORY_KIB, " 65536 "),
            (ENV_LOGGER_NAME, "audit"),
            (ENV_ROWS, "/data/users.jsonl"),
        ]))
        .unwrap();
        assert_eq!(config.vault.iterations, 5);
        assert_eq!(config.vault.memory_kib, 65536);
        assert_eq!(config.vault.parallelism, 1);
        assert_eq!(config.logger_name, "audit");
        assert_eq!(config.rows, PathBuf::from("/data/users.jsonl"));
    }

    #[test]
    fn test_invalid_number() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_VAULT_PARALLELISM, "many")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: ENV_VAULT_PARALLELISM,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_logger_name() {
        assert!(AppConfig::from_lookup(lookup(&[(ENV_LOGGER_NAME, "two words")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_LOGGER_NAME, "  ")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_LOGGER_NAME, "a;b")])).is_err());

        let err = AppConfig::from_lookup(lookup(&[(ENV_LOGGER_NAME, "svc=users")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_LOGGER_NAME,
                reason: "must not contain '='".to_string(),
            }
        );
    }

    #[test]
    fn test_json_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"logger_name":"x"}"#).unwrap();
        assert_eq!(config.logger_name, "x");
        assert_eq!(config.vault, VaultParams::default());
    }
}
