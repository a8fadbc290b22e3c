//! Transactional scope shared by the repositories of one request.
//!
//! A unit of work is bound to a single database connection. Repositories built
//! over the same session run their statements in the same transaction, which
//! is closed by [`UnitOfWork::commit`] or [`UnitOfWork::rollback`].
//!
//! Workflows use [`in_unit_of_work`] instead of calling these methods
//! directly, so every exit path ends in exactly one of them.

use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::errors::{CatalogError, CatalogResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Commits the open transaction. A no-op when nothing was started.
    async fn commit(&self) -> CatalogResult<()>;

    /// Rolls back the open transaction. A no-op when nothing was started.
    async fn rollback(&self) -> CatalogResult<()>;
}

/// Runs `work` as one transactional scope.
///
/// Commits when `work` succeeds. When it fails, rolls back and returns the
/// original error; a failing rollback is logged and does not replace it.
///
/// A scope abandoned by cancellation or panic is rolled back when the session
/// is dropped.
///
/// # Errors
///
/// Returns the error produced by `work`, or the commit error.
pub async fn in_unit_of_work<U, F, T>(uow: &U, work: F) -> Result<T, CatalogError>
where
    U: UnitOfWork + ?Sized,
    F: Future<Output = Result<T, CatalogError>>,
{
    match work.await {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                warn!(error = %rollback_err, "Rollback failed after aborted unit of work");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commits_on_success() {
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(1).returning(|| Ok(()));
        uow.expect_rollback().times(0);

        let result = in_unit_of_work(&uow, async { Ok::<_, CatalogError>(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_rolls_back_and_returns_original_error() {
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(0);
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let result: CatalogResult<()> =
            in_unit_of_work(&uow, async { Err(CatalogError::BookNotFound) }).await;

        assert!(matches!(result, Err(CatalogError::BookNotFound)));
    }

    #[tokio::test]
    async fn test_rollback_failure_does_not_mask_error() {
        let mut uow = MockUnitOfWork::new();
        uow.expect_rollback()
            .times(1)
            .returning(|| Err(CatalogError::Integrity("connection closed".to_string())));

        let result: CatalogResult<()> =
            in_unit_of_work(&uow, async { Err(CatalogError::AuthorNotFound) }).await;

        assert!(matches!(result, Err(CatalogError::AuthorNotFound)));
    }

    #[tokio::test]
    async fn test_commit_failure_is_returned() {
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit()
            .times(1)
            .returning(|| Err(CatalogError::Integrity("serialization failure".to_string())));

        let result = in_unit_of_work(&uow, async { Ok::<_, CatalogError>(()) }).await;

        assert!(matches!(result, Err(CatalogError::Integrity(_))));
    }
}
