//! PostgreSQL implementation of the author repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Connection;
use uuid::Uuid;

use super::rows::AuthorRow;
use super::session::{PgSession, timed};
use crate::domain::entities::{Author, NewAuthor};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::AuthorRepository;
use crate::utils::db_error::is_unique_violation;

const AUTHOR_COLUMNS: &str = "id, name, slug, bio, birth_date, death_date, country, photo_url";

/// PostgreSQL repository for authors, bound to a request's [`PgSession`].
pub struct PgAuthorRepository {
    session: Arc<PgSession>,
}

impl PgAuthorRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, author: NewAuthor) -> CatalogResult<Author> {
        let sql = format!(
            "INSERT INTO authors (id, name, slug, bio, birth_date, death_date, country) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {AUTHOR_COLUMNS}"
        );

        let mut tx = self.session.transaction().await?;
        let mut savepoint = Connection::begin(&mut **tx).await?;

        let inserted = timed(
            sqlx::query_as::<_, AuthorRow>(&sql)
                .bind(Uuid::new_v4())
                .bind(&author.name)
                .bind(&author.slug)
                .bind(&author.bio)
                .bind(author.birth_date)
                .bind(author.death_date)
                .bind(&author.country)
                .fetch_one(&mut *savepoint),
        )
        .await;

        match inserted {
            Ok(row) => {
                savepoint.commit().await?;
                Ok(row.into())
            }
            Err(e) => {
                savepoint.rollback().await?;
                if is_unique_violation(&e) {
                    Err(CatalogError::AuthorAlreadyExists)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Author>> {
        let sql = format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE slug = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, AuthorRow>(&sql)
                .bind(slug)
                .fetch_optional(&mut **tx),
        )
        .await?;

        Ok(row.map(Author::from))
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Author>> {
        let sql = format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, AuthorRow>(&sql)
                .bind(id)
                .fetch_optional(&mut **tx),
        )
        .await?;

        Ok(row.map(Author::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let mut tx = self.session.transaction().await?;
        let result = timed(
            sqlx::query("DELETE FROM authors WHERE id = $1")
                .bind(id)
                .execute(&mut **tx),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_photo_url(&self, id: Uuid, photo_url: &str) -> CatalogResult<Option<Author>> {
        let sql = format!(
            "UPDATE authors SET photo_url = $2 WHERE id = $1 RETURNING {AUTHOR_COLUMNS}"
        );

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, AuthorRow>(&sql)
                .bind(id)
                .bind(photo_url)
                .fetch_optional(&mut **tx),
        )
        .await?;

        Ok(row.map(Author::from))
    }
}
