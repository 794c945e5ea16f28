//! Password hashing with Argon2id.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    #[error("Password hash error: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Argon2id hasher with a tunable time cost.
///
/// The time cost (number of passes) is the work factor; memory and parallelism
/// stay at the crate defaults.
#[derive(Debug, Clone)]
pub struct PasswordHasherConfig {
    time_cost: u32,
}

impl PasswordHasherConfig {
    pub fn new(time_cost: u32) -> Self {
        Self { time_cost }
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hashes a password with a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Verifies a password against a stored PHC string.
    ///
    /// Parameters are read from the stored hash, so hashes made with an older
    /// time cost still verify.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasherConfig {
    fn default() -> Self {
        Self::new(Params::DEFAULT_T_COST)
    }
}
