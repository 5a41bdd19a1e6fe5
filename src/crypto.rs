// src/crypto.rs
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Argon2 error: {0}")]
    Argon2Error(String),  // Manual conversion from argon2 error

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Argon2id cost parameters used for the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536, // 64 MB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

fn argon2_with(params: &KdfParams) -> Result<Argon2<'static>> {
    let params = argon2::Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| CryptoError::Argon2Error(e.to_string()))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
}

// Hash a secret word into a PHC string with a fresh salt
pub fn hash_secret(secret: &str, params: &KdfParams) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_with(params)?;

    let password_hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CryptoError::HashingError(e.to_string()))?;

    Ok(password_hash.to_string())
}

// Verify a secret word against a stored PHC string. The cost parameters
// are read back from the hash itself.
pub fn verify_secret(secret: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CryptoError::InvalidFormat(e.to_string()))?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::Argon2Error(e.to_string())),
    }
}
