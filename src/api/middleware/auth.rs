//! Bearer token authentication extractors.
//!
//! Handlers opt in by taking [`CurrentUser`] or [`AdminUser`] as an argument,
//! which keeps public and protected methods on the same path.
//!
//! ```text
//! Authorization: Bearer <access token>
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_auth::AuthBearer;
use tracing::debug;

use crate::api::deps::RequestScope;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// The account an access token was issued for.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` (and `WWW-Authenticate: Bearer`) when the
/// header is missing, the token is invalid or expired, or the account is gone.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| AppError::unauthorized("Authorization header is missing or invalid"))?;

        let user = RequestScope::new(state)
            .authenticate_user()
            .execute(&token)
            .await?;

        Ok(Self(user))
    }
}

/// A [`CurrentUser`] with the admin role.
///
/// # Errors
///
/// Rejects like [`CurrentUser`], and with `403 Forbidden` for other roles.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            debug!(user_id = %user.id, "Admin route refused");
            return Err(AppError::forbidden("Admin role required"));
        }

        Ok(Self(user))
    }
}
