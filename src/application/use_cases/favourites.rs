//! A user's favourite books.
//!
//! Every write resolves the book by slug before opening its scope, so an
//! unknown slug fails with [`CatalogError::BookNotFound`] without touching a
//! transaction.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::responses::FavouriteBookResponse;
use crate::domain::entities::ReadingStatus;
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::{BookRepository, FavouriteBookRepository};
use crate::domain::unit_of_work::{UnitOfWork, in_unit_of_work};

use super::book_for_slug;

pub struct AddFavourite<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork> {
    favourites: Arc<F>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork> AddFavourite<F, B, U> {
    pub fn new(favourites: Arc<F>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            favourites,
            books,
            uow,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::FavouriteAlreadyExists`] when the book is
    /// already in the user's favourites.
    pub async fn execute(&self, user_id: Uuid, slug: &str) -> CatalogResult<FavouriteBookResponse> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        let favourite =
            in_unit_of_work(self.uow.as_ref(), self.favourites.add(user_id, book.id)).await?;

        Ok(favourite.into())
    }
}

pub struct DeleteFavourite<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork> {
    favourites: Arc<F>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork> DeleteFavourite<F, B, U> {
    pub fn new(favourites: Arc<F>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            favourites,
            books,
            uow,
        }
    }

    pub async fn execute(&self, user_id: Uuid, slug: &str) -> CatalogResult<()> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        in_unit_of_work(self.uow.as_ref(), async {
            if self.favourites.delete(user_id, book.id).await? {
                Ok(())
            } else {
                Err(CatalogError::FavouriteNotFound)
            }
        })
        .await
    }
}

/// Lists a user's favourites. Reads only, no scope.
pub struct FindFavourites<F: FavouriteBookRepository> {
    favourites: Arc<F>,
}

impl<F: FavouriteBookRepository> FindFavourites<F> {
    pub fn new(favourites: Arc<F>) -> Self {
        Self { favourites }
    }

    pub async fn execute(&self, user_id: Uuid) -> CatalogResult<Vec<FavouriteBookResponse>> {
        let favourites = self.favourites.find_all(user_id).await?;
        Ok(favourites.into_iter().map(Into::into).collect())
    }
}

pub struct UpdateFavouriteStatus<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork> {
    favourites: Arc<F>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<F: FavouriteBookRepository, B: BookRepository, U: UnitOfWork>
    UpdateFavouriteStatus<F, B, U>
{
    pub fn new(favourites: Arc<F>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            favourites,
            books,
            uow,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        status: ReadingStatus,
    ) -> CatalogResult<FavouriteBookResponse> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        let favourite = in_unit_of_work(self.uow.as_ref(), async {
            self.favourites
                .update_status(user_id, book.id, status)
                .await?
                .ok_or(CatalogError::FavouriteNotFound)
        })
        .await?;

        Ok(favourite.into())
    }
}
