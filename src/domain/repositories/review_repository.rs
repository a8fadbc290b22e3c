//! Repository trait for book reviews.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{NewReview, Review, ReviewUpdate};
use crate::domain::errors::CatalogResult;

/// Repository interface for reviews.
///
/// Reviews are read back with the reviewing user and the book loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a review.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::ReviewAlreadyExists`] when the
    /// user already reviewed this book, and
    /// [`crate::domain::errors::CatalogError::Integrity`] for any other constraint
    /// violation.
    async fn create(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        review: NewReview,
    ) -> CatalogResult<Review>;

    /// Lists all reviews of a book, newest first.
    async fn find_all_by_book_id(&self, book_id: Uuid) -> CatalogResult<Vec<Review>>;

    /// Replaces text and rating. Returns `Ok(None)` when the user has no review
    /// for this book.
    async fn update(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        update: ReviewUpdate,
    ) -> CatalogResult<Option<Review>>;

    /// Deletes the user's review. Returns `false` when nothing was deleted.
    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<bool>;
}
