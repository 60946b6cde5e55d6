//! Password hashing and verification
//!
//! PBKDF2-HMAC-SHA512 with a fresh random salt per account. Parameters are
//! fixed; changing any of them invalidates every stored credential.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use tracing::error;

use crate::error::{AppError, Result};

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 10_000;
/// Derived key length in bytes.
pub const HASH_LEN: usize = 64;
/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Salt and derived hash, both hex-encoded. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: String,
    pub hash: String,
}

/// Derives and checks password hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes `password` under a newly generated salt.
    pub fn hash(&self, password: &str) -> Credential {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);

        let hash = derive(password, &salt);
        Credential { salt, hash }
    }

    /// Recomputes the hash under the stored salt and compares.
    ///
    /// The comparison is constant-time over equal-length inputs.
    pub fn verify(&self, password: &str, salt: &str, hash: &str) -> bool {
        let candidate = derive(password, salt);
        candidate.as_bytes().ct_eq(hash.as_bytes()).into()
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> Result<Credential> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing task failed");
                AppError::Internal("password hashing failed".to_string())
            })
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(&self, password: String, credential: Credential) -> Result<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || {
            hasher.verify(&password, &credential.salt, &credential.hash)
        })
        .await
        .map_err(|err| {
            error!(error = %err, "password verification task failed");
            AppError::Internal("password verification failed".to_string())
        })
    }
}

/// The hex salt string itself is the PBKDF2 salt input.
fn derive(password: &str, salt: &str) -> String {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS, &mut out);
    hex::encode(out)
}
