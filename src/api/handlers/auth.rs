//! Handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::deps::RequestScope;
use crate::api::dto::auth::{LoginRequest, RegisterRequest};
use crate::application::responses::{TokenResponse, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /v1/auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "reader@example.com",
///   "password": "correct horse",
///   "first_name": "Ann",
///   "last_name": "Reader",
///   "is_admin": false
/// }
/// ```
///
/// # Errors
///
/// - **400** - Validation failed
/// - **409** - Email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = RequestScope::new(&state)
        .register()
        .execute(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /v1/auth/login`
///
/// # Response
///
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiJ9...", "token_type": "bearer" }
/// ```
///
/// # Errors
///
/// - **400** - Unknown email or wrong password (same message for both)
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let token = RequestScope::new(&state)
        .log_in()
        .execute(&payload.email, &payload.password)
        .await?;

    Ok(Json(token))
}
