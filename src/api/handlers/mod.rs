//! HTTP request handlers for API endpoints.
//!
//! Each handler builds a [`crate::api::deps::RequestScope`], runs one use case
//! and maps its error into [`crate::error::AppError`].

pub mod auth;
pub mod authors;
pub mod books;
pub mod favourites;
pub mod health;
pub mod metrics;
pub mod reviews;

pub use auth::{login_handler, register_handler};
pub use authors::{
    create_author_handler, delete_author_handler, get_author_handler,
    update_author_avatar_handler,
};
pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    update_book_handler,
};
pub use favourites::{
    add_favourite_handler, delete_favourite_handler, list_favourites_handler,
    update_favourite_handler,
};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use reviews::{
    create_review_handler, delete_review_handler, list_reviews_handler, update_review_handler,
};
