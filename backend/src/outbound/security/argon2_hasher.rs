//! Argon2id implementation of the `PasswordHasher` port.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::domain::ports::{PasswordHash, PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// Password hasher producing Argon2id PHC strings.
///
/// # Examples
/// ```
/// use habit_tracker::domain::ports::PasswordHasher;
/// use habit_tracker::outbound::security::Argon2PasswordHasher;
///
/// let hasher = Argon2PasswordHasher::default();
/// let hash = hasher.hash("s3cret").unwrap();
/// assert!(hash.as_str().starts_with("$argon2id$"));
/// assert!(hasher.verify("s3cret", &hash).unwrap());
/// assert!(!hasher.verify("guess", &hash).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Option<Params>,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters instead of the library defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hash`] when the parameters are out of
    /// range.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self {
            params: Some(params),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        match &self.params {
            Some(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone()),
            None => Argon2::default(),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed(err.to_string()))?;
        // Verification reads the cost parameters from the PHC string.
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
