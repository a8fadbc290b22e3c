//! HS256 JWT access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use super::service::{AccessClaims, TokenService};
use crate::domain::errors::{CatalogError, CatalogResult};

/// Default token lifetime.
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 120;

/// [`TokenService`] signing tokens with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::minutes(ttl_minutes),
        }
    }
}

impl TokenService for JwtTokenService {
    fn create_access_token(&self, user_id: Uuid) -> CatalogResult<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CatalogError::Security(format!("token signing failed: {e}")))
    }

    fn decode_access_token(&self, token: &str) -> Option<AccessClaims> {
        match decode::<AccessClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Rejected access token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_carries_subject() {
        let service = JwtTokenService::new("test-secret", DEFAULT_ACCESS_TOKEN_TTL_MINUTES);
        let user_id = Uuid::new_v4();

        let token = service.create_access_token(user_id).unwrap();
        let claims = service.decode_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 120 * 60);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtTokenService::new("secret-a", 10);
        let verifier = JwtTokenService::new("secret-b", 10);

        let token = issuer.create_access_token(Uuid::new_v4()).unwrap();

        assert!(verifier.decode_access_token(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtTokenService::new("test-secret", -10);
        let token = service.create_access_token(Uuid::new_v4()).unwrap();

        assert!(service.decode_access_token(&token).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = JwtTokenService::new("test-secret", 10);
        assert!(service.decode_access_token("not.a.jwt").is_none());
    }
}
