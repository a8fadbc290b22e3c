//! PostgreSQL implementation of the favourite book repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use super::rows::{BOOK_COLUMNS, FavouriteRow};
use super::session::{PgSession, timed};
use crate::domain::entities::{FavouriteBook, ReadingStatus};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::FavouriteBookRepository;
use crate::utils::db_error::unique_violation;

const FAVOURITE_UNIQUE_CONSTRAINT: &str = "uq_user_book_favourite";

/// PostgreSQL repository for favourites, bound to a request's [`PgSession`].
pub struct PgFavouriteBookRepository {
    session: Arc<PgSession>,
}

impl PgFavouriteBookRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

/// Loads a favourite together with its book.
///
/// A favourite that was just written but cannot be joined to its book is an
/// integrity failure.
async fn read_back(conn: &mut PgConnection, favourite_id: Uuid) -> CatalogResult<FavouriteBook> {
    let sql = format!(
        "SELECT f.id AS favourite_id, f.status AS favourite_status, {BOOK_COLUMNS} \
         FROM favourite_books f \
         JOIN books b ON b.id = f.book_id \
         WHERE f.id = $1"
    );

    let row = timed(
        sqlx::query_as::<_, FavouriteRow>(&sql)
            .bind(favourite_id)
            .fetch_optional(conn),
    )
    .await?;

    row.ok_or_else(|| {
        CatalogError::Integrity(format!("favourite {favourite_id} has no readable book"))
    })?
    .try_into()
}

#[async_trait]
impl FavouriteBookRepository for PgFavouriteBookRepository {
    async fn add(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<FavouriteBook> {
        let mut tx = self.session.transaction().await?;
        let mut savepoint = Connection::begin(&mut **tx).await?;

        let inserted = timed(
            sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO favourite_books (id, status, user_id, book_id) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(Uuid::new_v4())
            .bind(ReadingStatus::default().as_str())
            .bind(user_id)
            .bind(book_id)
            .fetch_one(&mut *savepoint),
        )
        .await;

        let favourite_id = match inserted {
            Ok(id) => {
                savepoint.commit().await?;
                id
            }
            Err(e) => {
                savepoint.rollback().await?;
                return Err(match unique_violation(&e) {
                    Some(Some(FAVOURITE_UNIQUE_CONSTRAINT)) => CatalogError::FavouriteAlreadyExists,
                    Some(constraint) => CatalogError::Integrity(format!(
                        "unexpected unique violation on {}",
                        constraint.unwrap_or("unknown constraint")
                    )),
                    None => e.into(),
                });
            }
        };

        read_back(&mut **tx, favourite_id).await
    }

    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<bool> {
        let mut tx = self.session.transaction().await?;
        let result = timed(
            sqlx::query("DELETE FROM favourite_books WHERE user_id = $1 AND book_id = $2")
                .bind(user_id)
                .bind(book_id)
                .execute(&mut **tx),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self, user_id: Uuid) -> CatalogResult<Vec<FavouriteBook>> {
        let sql = format!(
            "SELECT f.id AS favourite_id, f.status AS favourite_status, {BOOK_COLUMNS} \
             FROM favourite_books f \
             JOIN books b ON b.id = f.book_id \
             WHERE f.user_id = $1 \
             ORDER BY b.title"
        );

        let mut tx = self.session.transaction().await?;
        let rows = timed(
            sqlx::query_as::<_, FavouriteRow>(&sql)
                .bind(user_id)
                .fetch_all(&mut **tx),
        )
        .await?;

        rows.into_iter().map(FavouriteBook::try_from).collect()
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        status: ReadingStatus,
    ) -> CatalogResult<Option<FavouriteBook>> {
        let mut tx = self.session.transaction().await?;
        let updated = timed(
            sqlx::query_scalar::<_, Uuid>(
                "UPDATE favourite_books SET status = $3 \
                 WHERE user_id = $1 AND book_id = $2 \
                 RETURNING id",
            )
            .bind(user_id)
            .bind(book_id)
            .bind(status.as_str())
            .fetch_optional(&mut **tx),
        )
        .await?;

        match updated {
            Some(favourite_id) => read_back(&mut **tx, favourite_id).await.map(Some),
            None => Ok(None),
        }
    }
}
