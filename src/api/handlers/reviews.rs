//! Handlers for book reviews. One review per user and book.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::deps::RequestScope;
use crate::api::dto::reviews::ReviewRequest;
use crate::api::middleware::CurrentUser;
use crate::application::responses::ReviewResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists reviews of a book, newest first.
///
/// # Endpoint
///
/// `GET /v1/books/{slug}/reviews`
///
/// An unknown slug returns an empty list.
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = RequestScope::new(&state)
        .find_reviews()
        .execute(&slug)
        .await?;

    Ok(Json(reviews))
}

/// Reviews a book.
///
/// # Endpoint
///
/// `POST /v1/books/{slug}/reviews`
///
/// # Request Body
///
/// ```json
/// { "review": "At least ten characters", "rating": 4 }
/// ```
///
/// # Errors
///
/// - **400** - Review shorter than 10 characters or rating outside 1-5
/// - **404** - Unknown book
/// - **409** - The user already reviewed this book
pub async fn create_review_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    payload.validate()?;

    let review = RequestScope::new(&state)
        .create_review()
        .execute(user.id, &slug, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// `PATCH /v1/books/{slug}/reviews` replaces the user's review.
pub async fn update_review_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    payload.validate()?;

    let review = RequestScope::new(&state)
        .update_review()
        .execute(user.id, &slug, payload.into())
        .await?;

    Ok(Json(review))
}

/// `DELETE /v1/books/{slug}/reviews`
pub async fn delete_review_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    RequestScope::new(&state)
        .delete_review()
        .execute(user.id, &slug)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
