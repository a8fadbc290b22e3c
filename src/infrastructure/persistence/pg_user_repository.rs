//! PostgreSQL implementation of the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Connection;
use uuid::Uuid;

use super::rows::UserRow;
use super::session::{PgSession, timed};
use crate::domain::entities::{NewUser, User};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::UserRepository;
use crate::utils::db_error::is_unique_violation;

const USER_COLUMNS: &str = "id, email, hashed_password, first_name, last_name, role";

pub struct PgUserRepository {
    session: Arc<PgSession>,
}

impl PgUserRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> CatalogResult<User> {
        let sql = format!(
            "INSERT INTO users (id, email, hashed_password, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        );

        let mut tx = self.session.transaction().await?;
        let mut savepoint = Connection::begin(&mut **tx).await?;

        let inserted = timed(
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(Uuid::new_v4())
                .bind(&user.email)
                .bind(&user.hashed_password)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(user.role.as_str())
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
                    Err(CatalogError::UserAlreadyExists)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(email)
                .fetch_optional(&mut **tx),
        )
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let mut tx = self.session.transaction().await?;
        let row = timed(
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(id)
                .fetch_optional(&mut **tx),
        )
        .await?;

        row.map(User::try_from).transpose()
    }
}
