//! Cost parameters for password hashing.

use crate::error::{Result, VaultError};
use argon2::Params;
use serde::{Deserialize, Serialize};

/// Argon2id memory cost in KiB (19 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;

/// Argon2id iteration count.
pub const DEFAULT_ITERATIONS: u32 = 3;

/// Argon2id lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Stored hashes may ask for at most this multiple of the larger of a
/// vault's own and the default work factor before verification refuses them.
pub const VERIFY_COST_HEADROOM: u32 = 8;

/// Work factor for [`crate::SecretVault`].
///
/// Every hash records the parameters it was produced with, so changing these
/// never breaks verification of older hashes; see
/// [`crate::SecretVault::needs_rehash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultParams {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Number of passes over memory.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    DEFAULT_MEMORY_KIB
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_parallelism() -> u32 {
    DEFAULT_PARALLELISM
}

impl Default for VaultParams {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl VaultParams {
    /// Convert into Argon2 parameters, rejecting out-of-range values.
    pub fn to_argon2(&self) -> Result<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| VaultError::InvalidParams(e.to_string()))
    }

    /// Whether `params` describe the same work factor.
    pub(crate) fn matches(&self, params: &Params) -> bool {
        params.m_cost() == self.memory_kib
            && params.t_cost() == self.iterations
            && params.p_cost() == self.parallelism
    }

    /// Whether a stored hash's memory, passes and lanes are all within
    /// [`VERIFY_COST_HEADROOM`] times the larger of these and the defaults.
    pub(crate) fn admits(&self, params: &Params) -> bool {
        let ceiling = |own: u32, default: u32| own.max(default).saturating_mul(VERIFY_COST_HEADROOM);
        params.m_cost() <= ceiling(self.memory_kib, DEFAULT_MEMORY_KIB)
            && params.t_cost() <= ceiling(self.iterations, DEFAULT_ITERATIONS)
            && params.p_cost() <= ceiling(self.parallelism, DEFAULT_PARALLELISM)
    }
}

impl From<&Params> for VaultParams {
    fn from(params: &Params) -> Self {
        Self {
            memory_kib: params.m_cost(),
            iterations: params.t_cost(),
            parallelism: params.p_cost(),
        }
    }
}
