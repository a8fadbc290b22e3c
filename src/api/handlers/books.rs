//! Handlers for books.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::deps::RequestScope;
use crate::api::dto::books::{BooksQuery, CreateBookRequest, UpdateBookRequest};
use crate::api::middleware::AdminUser;
use crate::application::responses::BookResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists books, ordered by title.
///
/// # Endpoint
///
/// `GET /v1/books`
///
/// # Query Parameters
///
/// - `genre` - `fantasy`, `science-fiction`, `detective`, `romance` or `nonfiction`
/// - `year_from`, `year_to` - Inclusive publication year range
/// - `pages_from`, `pages_to` - Inclusive page count range
/// - `limit` - Maximum number of books (1-1000)
///
/// # Errors
///
/// - **400** - Inverted range or out-of-bounds limit
pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    query.validate()?;

    let books = RequestScope::new(&state)
        .get_books()
        .execute(query.into())
        .await?;

    Ok(Json(books))
}

/// `GET /v1/books/{slug}`. Served from cache when possible.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book = RequestScope::new(&state)
        .find_book_by_slug()
        .execute(&slug)
        .await?;

    Ok(Json(book))
}

/// Creates a book. Admin only.
///
/// # Endpoint
///
/// `POST /v1/books`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Dune",
///   "genre": "science-fiction",
///   "language": "English",
///   "publish_year": 1965,
///   "author_id": "6f1c..."
/// }
/// ```
///
/// `language` defaults to `Русский`. The slug is derived from the title.
///
/// # Errors
///
/// - **404** - `author_id` names no author
/// - **409** - Title already taken
pub async fn create_book_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    payload.validate()?;

    let book = RequestScope::new(&state)
        .create_book()
        .execute(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Replaces the mutable fields of a book. Admin only.
///
/// # Endpoint
///
/// `PATCH /v1/books/{id}`
///
/// Omitting `language` keeps the stored one. Every other field is overwritten.
///
/// # Errors
///
/// - **404** - Unknown book, or `author_id` names no author
pub async fn update_book_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, AppError> {
    payload.validate()?;

    let book = RequestScope::new(&state)
        .update_book()
        .execute(id, payload.into())
        .await?;

    Ok(Json(book))
}

/// `DELETE /v1/books/{id}`. Admin only. Reviews and favourites go with it.
pub async fn delete_book_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    RequestScope::new(&state).delete_book().execute(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
