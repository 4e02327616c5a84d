use scrypt::Params;

use crate::constants::{SCRYPT_DK_LEN, SCRYPT_LOG_N, SCRYPT_P, SCRYPT_R};
use crate::error::{FerrotaskError, Result};
use crate::security::constant_time_eq;

/// Derives verifiable password digests with a memory-hard KDF.
///
/// The salt is a deployment-wide secret injected at construction; the cost
/// parameters are fixed so a digest is fully determined by (password, salt).
/// Digests are 64 lowercase hex characters and safe to store in place of
/// the plaintext.
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    /// Creates a hasher bound to a deployment salt
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    fn params() -> Result<Params> {
        Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, SCRYPT_DK_LEN)
            .map_err(|e| FerrotaskError::SystemError(format!("Invalid scrypt parameters: {}", e)))
    }

    /// Derives the hex-encoded digest of a password.
    ///
    /// Deterministic for a fixed (password, salt) pair. CPU-bound by
    /// design; callers must not assume sub-millisecond latency.
    pub fn hash(&self, password: &str) -> Result<String> {
        let mut digest = [0u8; SCRYPT_DK_LEN];
        scrypt::scrypt(
            password.as_bytes(),
            self.salt.as_bytes(),
            &Self::params()?,
            &mut digest,
        )
        .map_err(|e| FerrotaskError::SystemError(format!("Key derivation failed: {}", e)))?;
        Ok(hex::encode(digest))
    }

    /// Checks a password against a stored digest.
    ///
    /// Never errors; any internal failure reads as a mismatch.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match self.hash(password) {
            Ok(computed) => constant_time_eq(&computed, digest),
            Err(_) => false,
        }
    }
}
