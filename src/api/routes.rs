//! API route configuration, mounted under `/v1`.
//!
//! Protection is per handler: handlers taking [`crate::api::middleware::CurrentUser`]
//! need a bearer token, those taking [`crate::api::middleware::AdminUser`]
//! need an admin's token.

use crate::api::handlers::{
    add_favourite_handler, create_author_handler, create_book_handler, create_review_handler,
    delete_author_handler, delete_book_handler, delete_favourite_handler, delete_review_handler,
    get_author_handler, get_book_handler, health_handler, list_books_handler,
    list_favourites_handler, list_reviews_handler, login_handler, register_handler,
    update_author_avatar_handler, update_book_handler, update_favourite_handler,
    update_review_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Credential endpoints.
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Exchange credentials for a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Catalog endpoints.
///
/// Path segments are named by resource. Reads address authors and books by
/// slug, admin writes by id.
///
/// - `POST   /authors`                   - Create author (admin)
/// - `GET    /authors/{slug}`            - Author by slug
/// - `DELETE /authors/{id}`              - Delete author (admin)
/// - `PATCH  /authors/{id}/avatar`       - Replace photo (admin, multipart)
/// - `GET    /books`                     - Filtered book list
/// - `POST   /books`                     - Create book (admin)
/// - `GET    /books/{slug}`              - Book by slug
/// - `PATCH  /books/{id}`                - Update book (admin)
/// - `DELETE /books/{id}`                - Delete book (admin)
/// - `GET    /books/{slug}/reviews`      - Reviews of a book
/// - `POST|PATCH|DELETE /books/{slug}/reviews` - The user's review
/// - `GET    /favourites/books`          - The user's favourites
/// - `POST|PATCH|DELETE /favourites/books/{slug}` - One favourite
/// - `GET    /health`                    - Database and cache status
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/authors", post(create_author_handler))
        .route(
            "/authors/{author}",
            get(get_author_handler).delete(delete_author_handler),
        )
        .route("/authors/{author}/avatar", patch(update_author_avatar_handler))
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/{book}",
            get(get_book_handler)
                .patch(update_book_handler)
                .delete(delete_book_handler),
        )
        .route(
            "/books/{book}/reviews",
            get(list_reviews_handler)
                .post(create_review_handler)
                .patch(update_review_handler)
                .delete(delete_review_handler),
        )
        .route("/favourites/books", get(list_favourites_handler))
        .route(
            "/favourites/books/{book}",
            post(add_favourite_handler)
                .patch(update_favourite_handler)
                .delete(delete_favourite_handler),
        )
        .route("/health", get(health_handler))
}

/// Everything under `/v1`, with credential endpoints rate limited.
///
/// `behind_proxy` keys the limiter on forwarding headers instead of the peer
/// address.
pub fn routes(behind_proxy: bool) -> Router<AppState> {
    let auth = if behind_proxy {
        auth_routes().layer(rate_limit::proxied_auth_layer())
    } else {
        auth_routes().layer(rate_limit::auth_layer())
    };

    Router::new().merge(auth).merge(catalog_routes())
}
