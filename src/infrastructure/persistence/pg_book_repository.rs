//! PostgreSQL implementation of the book repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Connection;
use uuid::Uuid;

use super::rows::{BOOK_COLUMNS, BookRow};
use super::session::{PgSession, timed};
use crate::domain::entities::{Book, BookFilter, BookUpdate, DEFAULT_LANGUAGE, NewBook};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::BookRepository;
use crate::utils::db_error::is_unique_violation;

/// PostgreSQL repository for books, bound to a request's [`PgSession`].
pub struct PgBookRepository {
    session: Arc<PgSession>,
}

impl PgBookRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, book: NewBook) -> CatalogResult<Book> {
        let sql = format!(
            "INSERT INTO books AS b (id, title, slug, language, genre, description, \
             short_description, publish_year, page_count, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {BOOK_COLUMNS}"
        );
        let language = book
            .language
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let mut tx = self.session.transaction().await?;
        let mut savepoint = Connection::begin(&mut **tx).await?;

        let inserted = timed(
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(Uuid::new_v4())
                .bind(&book.title)
                .bind(&book.slug)
                .bind(&language)
                .bind(book.genre.as_str())
                .bind(&book.description)
                .bind(&book.short_description)
                .bind(book.publish_year)
                .bind(book.page_count)
                .bind(book.author_id)
                .fetch_one(&mut *savepoint),
        )
        .await;

        match inserted {
            Ok(row) => {
                savepoint.commit().await?;
                row.try_into()
            }
            Err(e) => {
                savepoint.rollback().await?;
                if is_unique_violation(&e) {
                    Err(CatalogError::BookAlreadyExists)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn find_all(&self, filter: BookFilter) -> CatalogResult<Vec<Book>> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             WHERE ($1::text IS NULL OR b.genre = $1) \
               AND ($2::int IS NULL OR b.publish_year >= $2) \
               AND ($3::int IS NULL OR b.publish_year <= $3) \
               AND ($4::int IS NULL OR b.page_count >= $4) \
               AND ($5::int IS NULL OR b.page_count <= $5) \
             ORDER BY b.title \
             LIMIT $6"
        );

        let mut tx = self.session.transaction().await?;
        let rows = timed(
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(filter.genre.map(|g| g.as_str()))
                .bind(filter.year_from)
                .bind(filter.year_to)
                .bind(filter.pages_from)
                .bind(filter.pages_to)
                .bind(filter.limit)
                .fetch_all(&mut **tx),
        )
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books b WHERE b.slug = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(slug)
                .fetch_optional(&mut **tx),
        )
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books b WHERE b.id = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(id)
                .fetch_optional(&mut **tx),
        )
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn update(&self, id: Uuid, update: BookUpdate) -> CatalogResult<Option<Book>> {
        let sql = format!(
            "UPDATE books AS b SET \
                 language = COALESCE($2, b.language), \
                 genre = $3, \
                 description = $4, \
                 short_description = $5, \
                 publish_year = $6, \
                 page_count = $7, \
                 author_id = $8 \
             WHERE b.id = $1 \
             RETURNING {BOOK_COLUMNS}"
        );

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(id)
                .bind(&update.language)
                .bind(update.genre.as_str())
                .bind(&update.description)
                .bind(&update.short_description)
                .bind(update.publish_year)
                .bind(update.page_count)
                .bind(update.author_id)
                .fetch_optional(&mut **tx),
        )
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let mut tx = self.session.transaction().await?;
        let result = timed(
            sqlx::query("DELETE FROM books WHERE id = $1")
                .bind(id)
                .execute(&mut **tx),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
