//! Per-request database session.

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use async_trait::async_trait;
use sqlx::{PgPool, PgTransaction};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::errors::CatalogResult;
use crate::domain::unit_of_work::UnitOfWork;
use crate::telemetry;

type Slot = Option<PgTransaction<'static>>;

/// One logical database session, shared by all repositories of a request.
///
/// The transaction starts lazily on the first statement and stays open until
/// [`UnitOfWork::commit`] or [`UnitOfWork::rollback`]. After that the next
/// statement starts a new one.
///
/// Dropping a session with an open transaction rolls it back, which covers
/// cancelled requests and panics.
pub struct PgSession {
    pool: PgPool,
    tx: Mutex<Slot>,
}

/// Exclusive access to a session's open transaction.
///
/// Derefs to the transaction, so statements run on `&mut **guard`.
pub struct SessionTransaction<'a> {
    slot: MutexGuard<'a, Slot>,
}

impl Deref for SessionTransaction<'_> {
    type Target = PgTransaction<'static>;

    fn deref(&self) -> &Self::Target {
        self.slot
            .as_ref()
            .expect("slot is filled before the guard is handed out")
    }
}

impl DerefMut for SessionTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.slot
            .as_mut()
            .expect("slot is filled before the guard is handed out")
    }
}

impl PgSession {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tx: Mutex::new(None),
        }
    }

    /// Locks the session's transaction, beginning it if none is open.
    ///
    /// Statements run on `&mut **guard`. The lock is held until the guard is
    /// dropped, so keep it for the duration of one repository call only.
    ///
    /// # Errors
    ///
    /// Returns the driver error if a connection cannot be acquired.
    pub async fn transaction(&self) -> Result<SessionTransaction<'_>, sqlx::Error> {
        let mut slot = self.tx.lock().await;

        if slot.is_none() {
            debug!("Beginning transaction");
            *slot = Some(self.pool.begin().await?);
        }

        Ok(SessionTransaction { slot })
    }

    /// Whether a transaction is currently open.
    pub async fn in_transaction(&self) -> bool {
        self.tx.lock().await.is_some()
    }
}

#[async_trait]
impl UnitOfWork for PgSession {
    async fn commit(&self) -> CatalogResult<()> {
        if let Some(tx) = self.tx.lock().await.take() {
            tx.commit().await?;
            debug!("Transaction committed");
        }
        Ok(())
    }

    async fn rollback(&self) -> CatalogResult<()> {
        if let Some(tx) = self.tx.lock().await.take() {
            tx.rollback().await?;
            debug!("Transaction rolled back");
        }
        Ok(())
    }
}

/// Awaits one statement and records its latency in
/// `db_query_duration_seconds`, failed statements included.
pub(super) async fn timed<T, F>(statement: F) -> Result<T, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let started = Instant::now();
    let result = statement.await;
    telemetry::record_db_query(started.elapsed());
    result
}
