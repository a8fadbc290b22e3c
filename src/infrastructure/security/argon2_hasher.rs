//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use super::service::PasswordHasher;
use crate::domain::errors::{CatalogError, CatalogResult};

/// [`PasswordHasher`] using Argon2id with default parameters.
///
/// Hashes are PHC strings (`$argon2id$v=19$...`), so parameters and salt
/// travel with the hash.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> CatalogResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CatalogError::Security(format!("password hashing failed: {e}")))
    }

    fn verify(&self, plain: &str, hashed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hashed) else {
            return false;
        };
        self.argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}
