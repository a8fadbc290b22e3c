//! Password hashing and access tokens.
//!
//! - [`Argon2Hasher`] implements [`PasswordHasher`]
//! - [`JwtTokenService`] implements [`TokenService`]

mod argon2_hasher;
mod jwt_tokens;
mod service;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_tokens::{DEFAULT_ACCESS_TOKEN_TTL_MINUTES, JwtTokenService};
pub use service::{AccessClaims, PasswordHasher, TokenService};

#[cfg(test)]
pub use service::{MockPasswordHasher, MockTokenService};
