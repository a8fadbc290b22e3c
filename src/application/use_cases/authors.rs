//! Author workflows.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::caching::{self, AUTHOR_CACHE_TTL_SECONDS};
use crate::application::responses::AuthorResponse;
use crate::domain::entities::NewAuthor;
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::AuthorRepository;
use crate::domain::unit_of_work::{UnitOfWork, in_unit_of_work};
use crate::infrastructure::cache::CacheManager;
use crate::infrastructure::storage::{BlobStorage, Upload};
use crate::utils::slug::slugify;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAuthorCommand {
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub country: Option<String>,
}

/// Creates an author with a slug derived from the name.
pub struct CreateAuthor<A: AuthorRepository, U: UnitOfWork> {
    authors: Arc<A>,
    uow: Arc<U>,
}

impl<A: AuthorRepository, U: UnitOfWork> CreateAuthor<A, U> {
    pub fn new(authors: Arc<A>, uow: Arc<U>) -> Self {
        Self { authors, uow }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::AuthorAlreadyExists`] if the name or slug is taken.
    pub async fn execute(&self, command: CreateAuthorCommand) -> CatalogResult<AuthorResponse> {
        let new_author = NewAuthor {
            slug: slugify(&command.name),
            name: command.name,
            bio: command.bio,
            birth_date: command.birth_date,
            death_date: command.death_date,
            country: command.country,
        };

        let author = in_unit_of_work(self.uow.as_ref(), self.authors.create(new_author)).await?;

        info!(slug = %author.slug, "Author created");
        Ok(author.into())
    }
}

/// Read-through lookup of an author by slug, cached for
/// [`AUTHOR_CACHE_TTL_SECONDS`].
pub struct FindAuthorBySlug<A: AuthorRepository> {
    authors: Arc<A>,
    cache: Arc<dyn CacheManager>,
    ttl_seconds: i64,
}

impl<A: AuthorRepository> FindAuthorBySlug<A> {
    pub fn new(authors: Arc<A>, cache: Arc<dyn CacheManager>) -> Self {
        Self {
            authors,
            cache,
            ttl_seconds: AUTHOR_CACHE_TTL_SECONDS,
        }
    }

    pub async fn execute(&self, slug: &str) -> CatalogResult<AuthorResponse> {
        let key = caching::author_by_slug(slug);

        if let Some(cached) = caching::load::<AuthorResponse>(self.cache.as_ref(), &key).await {
            debug!(slug, "Author served from cache");
            return Ok(cached);
        }

        let author = self
            .authors
            .find_by_slug(slug)
            .await?
            .ok_or(CatalogError::AuthorNotFound)?;

        let response = AuthorResponse::from(author);
        caching::store(self.cache.as_ref(), &key, &response, self.ttl_seconds).await;

        Ok(response)
    }
}

/// Deletes an author. Their books stay, with `author_id` cleared.
pub struct DeleteAuthor<A: AuthorRepository, U: UnitOfWork> {
    authors: Arc<A>,
    cache: Arc<dyn CacheManager>,
    uow: Arc<U>,
}

impl<A: AuthorRepository, U: UnitOfWork> DeleteAuthor<A, U> {
    pub fn new(authors: Arc<A>, cache: Arc<dyn CacheManager>, uow: Arc<U>) -> Self {
        Self {
            authors,
            cache,
            uow,
        }
    }

    pub async fn execute(&self, id: Uuid) -> CatalogResult<()> {
        in_unit_of_work(self.uow.as_ref(), async {
            let author = self
                .authors
                .find_by_id(id)
                .await?
                .ok_or(CatalogError::AuthorNotFound)?;

            if !self.authors.delete_by_id(id).await? {
                return Err(CatalogError::AuthorNotFound);
            }

            self.cache.delete(&caching::author_by_slug(&author.slug)).await;
            Ok(())
        })
        .await
    }
}

/// Replaces an author's photo.
///
/// The new blob is uploaded inside the transactional scope, so an upload
/// failure aborts the update. Once the scope commits the previous photo is
/// deleted on a best-effort basis. When the scope fails after the upload, the
/// fresh blob is deleted the same way.
pub struct UpdateAuthorPhoto<A: AuthorRepository, U: UnitOfWork> {
    authors: Arc<A>,
    storage: Arc<dyn BlobStorage>,
    cache: Arc<dyn CacheManager>,
    uow: Arc<U>,
    bucket: String,
}

impl<A: AuthorRepository, U: UnitOfWork> UpdateAuthorPhoto<A, U> {
    pub fn new(
        authors: Arc<A>,
        storage: Arc<dyn BlobStorage>,
        cache: Arc<dyn CacheManager>,
        uow: Arc<U>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            authors,
            storage,
            cache,
            uow,
            bucket: bucket.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::AuthorNotFound`] if `id` names no author and
    /// [`CatalogError::Storage`] if the upload fails.
    pub async fn execute(&self, id: Uuid, upload: Upload) -> CatalogResult<AuthorResponse> {
        let mut uploaded_url = None;

        let outcome = in_unit_of_work(self.uow.as_ref(), async {
            let author = self
                .authors
                .find_by_id(id)
                .await?
                .ok_or(CatalogError::AuthorNotFound)?;

            let url = self.storage.save(upload, &self.bucket, true).await?;
            uploaded_url = Some(url.clone());

            let updated = self
                .authors
                .update_photo_url(id, &url)
                .await?
                .ok_or(CatalogError::AuthorNotFound)?;

            self.cache.delete(&caching::author_by_slug(&updated.slug)).await;
            Ok((author.photo_url, updated))
        })
        .await;

        match outcome {
            Ok((previous_url, updated)) => {
                if let Some(previous_url) = previous_url {
                    self.discard_blob(&previous_url).await;
                }
                Ok(updated.into())
            }
            Err(e) => {
                if let Some(orphan) = uploaded_url {
                    self.discard_blob(&orphan).await;
                }
                Err(e)
            }
        }
    }

    async fn discard_blob(&self, url: &str) {
        if let Err(e) = self.storage.delete(url).await {
            warn!(url, error = %e, "Failed to delete author photo");
        }
    }
}
