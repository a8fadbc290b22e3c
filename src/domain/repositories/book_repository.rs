//! Repository trait for book data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Book, BookFilter, BookUpdate, NewBook};
use crate::domain::errors::CatalogResult;

/// Repository interface for books.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_book.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Inserts a new book.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::BookAlreadyExists`] when the
    /// title or slug is taken.
    async fn create(&self, book: NewBook) -> CatalogResult<Book>;

    /// Lists books matching every criterion of `filter`, ordered by title.
    async fn find_all(&self, filter: BookFilter) -> CatalogResult<Vec<Book>>;

    /// Finds a book by slug. Absence is `Ok(None)`.
    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Book>>;

    /// Finds a book by id. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Book>>;

    /// Overwrites the mutable fields in a single statement.
    ///
    /// Returns `Ok(None)` when no book has this id.
    async fn update(&self, id: Uuid, update: BookUpdate) -> CatalogResult<Option<Book>>;

    /// Deletes a book. Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool>;
}
