mod common;

use book_catalog::domain::entities::{NewUser, Role};
use book_catalog::domain::errors::CatalogError;
use book_catalog::domain::repositories::UserRepository;
use book_catalog::infrastructure::persistence::{PgSession, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_string(),
        hashed_password: "$argon2id$stored".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Reader".to_string(),
        role,
    }
}

#[sqlx::test]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(PgSession::new(pool)));

    let created = repo
        .create(new_user("reader@example.com", Role::Admin))
        .await
        .unwrap();

    let by_email = repo.find_by_email("reader@example.com").await.unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap();

    assert_eq!(by_email, Some(created.clone()));
    assert_eq!(by_id, Some(created.clone()));
    assert!(created.is_admin());
}

#[sqlx::test]
async fn test_duplicate_email(pool: PgPool) {
    common::create_test_user(&pool, "reader@example.com", Role::User).await;
    let repo = PgUserRepository::new(Arc::new(PgSession::new(pool)));

    let err = repo
        .create(new_user("reader@example.com", Role::User))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::UserAlreadyExists));
}

#[sqlx::test]
async fn test_unknown_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(PgSession::new(pool)));

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
}
