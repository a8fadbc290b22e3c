//! Handlers for the current user's favourite books.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::deps::RequestScope;
use crate::api::dto::favourites::UpdateFavouriteRequest;
use crate::api::middleware::CurrentUser;
use crate::application::responses::FavouriteBookResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /v1/favourites/books`
pub async fn list_favourites_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<FavouriteBookResponse>>, AppError> {
    let favourites = RequestScope::new(&state)
        .find_favourites()
        .execute(user.id)
        .await?;

    Ok(Json(favourites))
}

/// Adds a book to the user's favourites with status `not_started`.
///
/// # Endpoint
///
/// `POST /v1/favourites/books/{slug}`
///
/// # Errors
///
/// - **404** - Unknown book
/// - **409** - Already a favourite
pub async fn add_favourite_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<(StatusCode, Json<FavouriteBookResponse>), AppError> {
    let favourite = RequestScope::new(&state)
        .add_favourite()
        .execute(user.id, &slug)
        .await?;

    Ok((StatusCode::CREATED, Json(favourite)))
}

/// Sets the reading status.
///
/// # Endpoint
///
/// `PATCH /v1/favourites/books/{slug}` with `{"status": "reading"}`
///
/// # Errors
///
/// - **404** - Unknown book, or the book is not a favourite
pub async fn update_favourite_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateFavouriteRequest>,
) -> Result<Json<FavouriteBookResponse>, AppError> {
    let favourite = RequestScope::new(&state)
        .update_favourite_status()
        .execute(user.id, &slug, payload.status)
        .await?;

    Ok(Json(favourite))
}

/// `DELETE /v1/favourites/books/{slug}`
pub async fn delete_favourite_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    RequestScope::new(&state)
        .delete_favourite()
        .execute(user.id, &slug)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
