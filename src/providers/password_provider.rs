use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::errors::internal::CryptoError;
use crate::errors::InternalError;

/// Minimum accepted pepper length in bytes
pub const MIN_PEPPER_LENGTH: usize = 16;

/// Password hashing and verification
///
/// Delegates to Argon2id (v0x13, default params). When a pepper is configured
/// it is passed to Argon2 as the secret parameter, so hashes produced with one
/// pepper do not verify under another.
#[derive(Clone, Default)]
pub struct PasswordProvider {
    pepper: Option<String>,
}

impl PasswordProvider {
    pub fn new() -> Self {
        Self { pepper: None }
    }

    /// Create a provider that mixes `pepper` into every hash
    pub fn with_pepper(pepper: impl Into<String>) -> Result<Self, InternalError> {
        let pepper = pepper.into();
        if pepper.len() < MIN_PEPPER_LENGTH {
            return Err(CryptoError::InvalidPepper {
                message: format!("must be at least {} bytes long", MIN_PEPPER_LENGTH),
            }
            .into());
        }
        Ok(Self { pepper: Some(pepper) })
    }

    fn argon2(&self) -> Result<Argon2<'_>, argon2::Error> {
        match &self.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper.as_bytes(),
                Algorithm::Argon2id,
                Version::V0x13,
                Params::default(),
            ),
            None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())),
        }
    }

    /// Hash a plaintext password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let argon2 = self.argon2().map_err(|e| CryptoError::InvalidPepper {
            message: e.to_string(),
        })?;
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::password_hash("hash_password", e))?
            .to_string();

        Ok(hash)
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// Fails closed: a missing or malformed hash yields `false`.
    pub fn verify_password(&self, password: &str, stored_hash: Option<&str>) -> bool {
        let Some(stored_hash) = stored_hash else {
            return false;
        };

        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                return false;
            }
        };

        match self.argon2() {
            Ok(argon2) => argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for PasswordProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordProvider")
            .field("pepper", &self.pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
