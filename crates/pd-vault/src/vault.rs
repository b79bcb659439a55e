//! One-way password hashing built around Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<digest>`),
//! so verification reads the algorithm, cost and salt back out of the hash
//! and never needs them supplied separately.

use crate::error::{Result, VaultError};
use crate::VaultParams;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

/// A self-describing, salted one-way hash of a secret.
///
/// There is deliberately no way to get the plaintext back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wrap stored hash bytes. Returns `None` when they are not UTF-8.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        String::from_utf8(bytes).ok().map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl From<String> for SecretHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<[u8]> for SecretHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for SecretHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashes and verifies secrets.
#[derive(Clone)]
pub struct SecretVault {
    params: VaultParams,
    argon2: Argon2<'static>,
}

impl SecretVault {
    /// Vault with the default work factor.
    pub fn new() -> Self {
        Self::from_argon2_params(VaultParams::default().to_argon2().unwrap_or_default())
    }

    /// Vault with a custom work factor.
    pub fn with_params(params: VaultParams) -> Result<Self> {
        Ok(Self::from_argon2_params(params.to_argon2()?))
    }

    fn from_argon2_params(params: Params) -> Self {
        Self {
            params: VaultParams::from(&params),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// The work factor new hashes are produced with.
    pub fn params(&self) -> VaultParams {
        self.params
    }

    /// Hash `plaintext` with a fresh random salt.
    ///
    /// Two calls with the same plaintext produce different hashes; both verify.
    pub fn hash(&self, plaintext: &str) -> Result<SecretHash> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| VaultError::HashFailed(e.to_string()))?;
        Ok(SecretHash(hash.to_string()))
    }

    /// Check `candidate` against a stored hash.
    ///
    /// Salt and cost come from the hash itself; digests are compared in
    /// constant time. Fails closed: a mismatch and a malformed, truncated,
    /// non-UTF-8 or unsupported hash all return `false`, as does a hash whose
    /// cost exceeds [`crate::params::VERIFY_COST_HEADROOM`] times the larger
    /// of this vault's and the default work factor.
    pub fn verify(&self, hash: impl AsRef<[u8]>, candidate: &str) -> bool {
        let Some(parsed) = parse(hash.as_ref()) else {
            return false;
        };
        match Params::try_from(&parsed) {
            Ok(params) if self.params.admits(&params) => {}
            _ => return false,
        }
        self.argon2
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// Whether a stored hash should be regenerated with this vault's settings.
    ///
    /// True when the hash uses another algorithm, version or work factor, or
    /// cannot be parsed at all.
    pub fn needs_rehash(&self, hash: impl AsRef<[u8]>) -> bool {
        let Some(parsed) = parse(hash.as_ref()) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        if parsed.version != Some(Version::V0x13.into()) {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(params) => !self.params.matches(&params),
            Err(_) => true,
        }
    }
}

impl Default for SecretVault {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SecretVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretVault")
            .field("params", &self.params)
            .finish()
    }
}

fn parse(bytes: &[u8]) -> Option<PasswordHash<'_>> {
    let s = std::str::from_utf8(bytes).ok()?;
    PasswordHash::new(s).ok()
}

/// Hash a password with the default vault.
pub fn hash_password(password: &str) -> Result<SecretHash> {
    SecretVault::new().hash(password)
}

/// Check a password against a hash with the default vault.
pub fn is_valid(hashed_password: impl AsRef<[u8]>, password: &str) -> bool {
    SecretVault::new().verify(hashed_password, password)
}
