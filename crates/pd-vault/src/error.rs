//! Error types for the secret vault.

use thiserror::Error;

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur while hashing.
///
/// Verification never returns an error: any failure there is reported as a
/// mismatch. Messages never include the plaintext.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Cost parameters rejected by the hash function.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// The hash computation itself failed.
    #[error("hashing failed: {0}")]
    HashFailed(String),
}
