//! One-way hashing and verification for plaintext secrets.
//!
//! Passwords are hashed with Argon2id using a fresh random salt per call.
//! The result is a self-describing PHC string: verification recovers the
//! algorithm, work factor and salt from the hash itself.
//!
//! # Guarantees
//!
//! - **Salted**: hashing the same plaintext twice gives different hashes.
//! - **Constant-time**: digest comparison does not leak where a mismatch occurs.
//! - **Fail-closed**: `verify` returns `false` for malformed or unsupported
//!   hashes instead of raising.
//! - **No plaintext escapes**: errors and `Debug` output never contain it.
//!
//! # Example
//!
//! ```no_run
//! use pd_vault::SecretVault;
//!
//! let vault = SecretVault::new();
//! let hash = vault.hash("MyAmazingPassw0rd").unwrap();
//! assert!(vault.verify(&hash, "MyAmazingPassw0rd"));
//! assert!(!vault.verify(&hash, "wrong"));
//! ```

pub mod error;
pub mod params;
pub mod vault;

pub use error::{Result, VaultError};
pub use params::VaultParams;
pub use vault::{hash_password, is_valid, SecretHash, SecretVault};
