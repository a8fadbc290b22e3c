//! Repository trait for author data access.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Author, NewAuthor};
use crate::domain::errors::CatalogResult;

/// Repository interface for authors.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuthorRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Inserts a new author.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::AuthorAlreadyExists`] when the
    /// name or slug is taken.
    async fn create(&self, author: NewAuthor) -> CatalogResult<Author>;

    /// Finds an author by slug. Absence is `Ok(None)`.
    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Author>>;

    /// Finds an author by id. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Author>>;

    /// Deletes an author. Returns `false` when nothing was deleted.
    ///
    /// Books written by the author keep existing with `author_id` cleared.
    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool>;

    /// Replaces the photo URL. Returns `Ok(None)` when the author does not exist.
    async fn update_photo_url(&self, id: Uuid, photo_url: &str) -> CatalogResult<Option<Author>>;
}
