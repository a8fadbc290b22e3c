//! Repository trait for user accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::CatalogResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts an account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::CatalogError::UserAlreadyExists`] when the
    /// email is taken.
    async fn create(&self, user: NewUser) -> CatalogResult<User>;

    async fn find_by_email(&self, email: &str) -> CatalogResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<User>>;
}
