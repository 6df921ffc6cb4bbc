/*!
 * Password Hashing
 *
 * Salted Argon2id hashing and constant-time verification of user passwords.
 *
 * # Stored Format
 *
 * A password hash is an opaque 40-byte blob: the first 8 bytes are the
 * random salt, the remaining 32 bytes are the derived key.
 *
 * # Cost
 *
 * Hashing with the default parameters allocates 64 MiB and is the most
 * expensive operation in the backend. Handlers run it on a blocking worker,
 * never on the request dispatch path, and token validation never touches it.
 */

use argon2::{Algorithm, Argon2, Params, Version};
use rand::{rngs::OsRng, RngCore};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Length of the random salt prefix
pub const SALT_LEN: usize = 8;

/// Length of the derived key
pub const KEY_LEN: usize = 32;

/// Total length of a stored password hash
pub const HASH_LEN: usize = SALT_LEN + KEY_LEN;

/// Password hashing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The cost parameters were rejected by Argon2
    #[error("invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Key derivation failed (e.g. password longer than Argon2 accepts)
    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub passes: u32,
    /// Degree of parallelism
    pub lanes: u32,
}

impl Default for HashParams {
    /// 1 pass, 64 MiB, 4 lanes
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            passes: 1,
            lanes: 4,
        }
    }
}

/// Salted, memory-hard password hasher
///
/// Holds no mutable state; clones are cheap and can be moved into blocking
/// tasks freely.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the given cost parameters
    pub fn new(params: HashParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.passes,
            params.lanes,
            Some(KEY_LEN),
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    /// Hash a password
    ///
    /// When `salt` is `None` a fresh salt is drawn from the operating
    /// system RNG. Returns `salt ++ derived_key` ([`HASH_LEN`] bytes).
    pub fn hash(&self, password: &str, salt: Option<[u8; SALT_LEN]>) -> Result<Vec<u8>, PasswordError> {
        let salt = salt.unwrap_or_else(|| {
            let mut salt = [0u8; SALT_LEN];
            OsRng.fill_bytes(&mut salt);
            salt
        });

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let mut key = [0u8; KEY_LEN];
        argon2
            .hash_password_into(password.as_bytes(), &salt, &mut key)
            .map_err(|e| PasswordError::Derivation(e.to_string()))?;

        let mut blob = Vec::with_capacity(HASH_LEN);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&key);
        Ok(blob)
    }

    /// Check a candidate password against a stored hash
    ///
    /// Never fails loudly: a blob shorter than the salt, a derivation error
    /// or any mismatch all yield `false`. The comparison covers the whole
    /// blob in constant time.
    pub fn verify(&self, stored: &[u8], candidate: &str) -> bool {
        if stored.len() < SALT_LEN {
            return false;
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&stored[..SALT_LEN]);

        match self.hash(candidate, Some(salt)) {
            Ok(recomputed) => recomputed.ct_eq(stored).into(),
            Err(e) => {
                tracing::warn!("password verification failed to derive key: {}", e);
                false
            }
        }
    }
}
