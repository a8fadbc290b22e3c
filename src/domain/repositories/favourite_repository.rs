//! Repository trait for a user's favourite books.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{FavouriteBook, ReadingStatus};
use crate::domain::errors::CatalogResult;

/// Repository interface for favourite books.
///
/// Writes are followed by a read-back that loads the related book. A read-back
/// that cannot find the book is reported as
/// [`crate::domain::errors::CatalogError::Integrity`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavouriteBookRepository: Send + Sync {
    /// Bookmarks a book for a user with the default status.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::FavouriteAlreadyExists`] when
    /// the pair is already bookmarked.
    async fn add(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<FavouriteBook>;

    /// Removes a bookmark. Returns `false` when nothing was deleted.
    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<bool>;

    /// Lists a user's bookmarks, ordered by book title.
    async fn find_all(&self, user_id: Uuid) -> CatalogResult<Vec<FavouriteBook>>;

    /// Changes the reading status. Returns `Ok(None)` when the pair is not bookmarked.
    async fn update_status(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        status: ReadingStatus,
    ) -> CatalogResult<Option<FavouriteBook>>;
}
