//! Session token issuance and verification
//!
//! Tokens are compact JWTs signed with HMAC-SHA-256 under the server secret.
//! Nothing is stored server-side: validity is recomputed from the token and the secret.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fortune_core::AccountId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session lifetime: 24 hours
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Subject username
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Get the account ID carried in the subject claim
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as an account ID
    pub fn account_id(&self) -> Result<AccountId, AppError> {
        AccountId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Issued-at as a UTC timestamp
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiry as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Check whether the claims are expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Token service for signing and checking session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    /// Create a new token service with the given secret and lifetime
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Create a token service with the standard 24 hour lifetime
    #[must_use]
    pub fn with_default_ttl(secret: &str) -> Self {
        Self::new(secret, SESSION_TTL_SECONDS)
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for an account, stamped with the current time
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, account_id: AccountId, username: &str) -> Result<String, AppError> {
        self.issue_at(account_id, username, Utc::now())
    }

    /// Issue a token for an account, stamped with `issued_at`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_at(
        &self,
        account_id: AccountId,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = SessionClaims {
            sub: account_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))
    }

    /// Verify a token's signature and expiry against the current time
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` for a bad signature or malformed token,
    /// `AppError::TokenExpired` once the expiry has passed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token's signature and expiry against `now`
    ///
    /// # Errors
    /// Same as [`TokenService::verify`]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
