//! PostgreSQL implementation of the review repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use super::rows::{BOOK_COLUMNS, ReviewRow};
use super::session::{PgSession, timed};
use crate::domain::entities::{NewReview, Review, ReviewUpdate};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::ReviewRepository;
use crate::utils::db_error::unique_violation;

const REVIEW_UNIQUE_CONSTRAINT: &str = "uq_user_book_review";

/// PostgreSQL repository for reviews, bound to a request's [`PgSession`].
pub struct PgReviewRepository {
    session: Arc<PgSession>,
}

impl PgReviewRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

fn review_select(filter: &str) -> String {
    format!(
        "SELECT r.id AS review_id, r.review, r.rating, r.created_at, \
                u.first_name, u.last_name, {BOOK_COLUMNS} \
         FROM reviews r \
         JOIN users u ON u.id = r.user_id \
         JOIN books b ON b.id = r.book_id \
         WHERE {filter}"
    )
}

async fn read_back(conn: &mut PgConnection, review_id: Uuid) -> CatalogResult<Review> {
    let sql = review_select("r.id = $1");

    let row = timed(
        sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(review_id)
            .fetch_optional(conn),
    )
    .await?;

    row.ok_or_else(|| {
        CatalogError::Integrity(format!("review {review_id} has no readable user or book"))
    })?
    .try_into()
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        review: NewReview,
    ) -> CatalogResult<Review> {
        let mut tx = self.session.transaction().await?;
        let mut savepoint = Connection::begin(&mut **tx).await?;

        let inserted = timed(
            sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO reviews (id, review, rating, user_id, book_id) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(Uuid::new_v4())
            .bind(&review.review)
            .bind(review.rating)
            .bind(user_id)
            .bind(book_id)
            .fetch_one(&mut *savepoint),
        )
        .await;

        let review_id = match inserted {
            Ok(id) => {
                savepoint.commit().await?;
                id
            }
            Err(e) => {
                savepoint.rollback().await?;
                return Err(match unique_violation(&e) {
                    Some(Some(REVIEW_UNIQUE_CONSTRAINT)) => CatalogError::ReviewAlreadyExists,
                    Some(constraint) => CatalogError::Integrity(format!(
                        "unexpected unique violation on {}",
                        constraint.unwrap_or("unknown constraint")
                    )),
                    None => e.into(),
                });
            }
        };

        read_back(&mut **tx, review_id).await
    }

    async fn find_all_by_book_id(&self, book_id: Uuid) -> CatalogResult<Vec<Review>> {
        let sql = format!("{} ORDER BY r.created_at DESC", review_select("r.book_id = $1"));

        let mut tx = self.session.transaction().await?;
        let rows = timed(
            sqlx::query_as::<_, ReviewRow>(&sql)
                .bind(book_id)
                .fetch_all(&mut **tx),
        )
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn update(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        update: ReviewUpdate,
    ) -> CatalogResult<Option<Review>> {
        let mut tx = self.session.transaction().await?;
        let updated = timed(
            sqlx::query_scalar::<_, Uuid>(
                "UPDATE reviews SET review = $3, rating = $4 \
                 WHERE user_id = $1 AND book_id = $2 \
                 RETURNING id",
            )
            .bind(user_id)
            .bind(book_id)
            .bind(&update.review)
            .bind(update.rating)
            .fetch_optional(&mut **tx),
        )
        .await?;

        match updated {
            Some(review_id) => read_back(&mut **tx, review_id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> CatalogResult<bool> {
        let mut tx = self.session.transaction().await?;
        let result = timed(
            sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND book_id = $2")
                .bind(user_id)
                .bind(book_id)
                .execute(&mut **tx),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
