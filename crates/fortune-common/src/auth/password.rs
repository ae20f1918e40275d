//! Password verifier hashing and checking
//!
//! Uses Argon2id with a fresh random salt per hash. The PHC string format embeds
//! the algorithm, cost parameters and salt, so no separate salt storage is needed.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::PasswordHashConfig;
use crate::error::AppError;

const DUMMY_PASSWORD: &str = "fortune-teller-timing-equalizer";

/// Password service for dependency injection
///
/// Holds the configured Argon2id instance and a verifier for a fixed dummy
/// password, used to spend the same work on logins for unknown usernames.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    dummy_verifier: String,
}

impl PasswordService {
    /// Create a new password service with the given cost parameters
    ///
    /// # Errors
    /// Returns `AppError::Config` if the parameters are rejected by Argon2,
    /// or `AppError::Internal` if the dummy verifier cannot be computed
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Config(format!("Invalid password hash parameters: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_verifier = hash_with(&argon2, DUMMY_PASSWORD)?;

        Ok(Self {
            argon2,
            dummy_verifier,
        })
    }

    /// Hash a password into a PHC verifier string
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a stored verifier
    ///
    /// A mismatch is `Ok(false)`. A verifier that cannot be parsed or checked is an error.
    ///
    /// # Errors
    /// Returns an error if the verifier is malformed or verification fails internally
    pub fn verify(&self, password: &str, verifier: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(verifier)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Run a full verification against the dummy verifier and discard the result
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_verifier);
    }
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("PasswordService")
            .field("m_cost", &params.m_cost())
            .field("t_cost", &params.t_cost())
            .field("p_cost", &params.p_cost())
            .finish_non_exhaustive()
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}
