//! Credential hashing and access-token contracts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::CatalogResult;

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes `plain` with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::Security`] if hashing fails.
    fn hash(&self, plain: &str) -> CatalogResult<String>;

    /// Checks `plain` against a stored hash. Malformed hashes never verify.
    fn verify(&self, plain: &str, hashed: &str) -> bool;
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id.
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
}

/// Issues and checks signed access tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issues a token for `user_id` that expires after the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::Security`] if signing fails.
    fn create_access_token(&self, user_id: Uuid) -> CatalogResult<String>;

    /// Verifies signature and expiry. Returns `None` for any invalid token.
    fn decode_access_token(&self, token: &str) -> Option<AccessClaims>;
}
