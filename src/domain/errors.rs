//! Domain error type shared by repositories and use cases.
//!
//! Variants are transport-agnostic. The HTTP mapping lives in
//! [`crate::error`].

use thiserror::Error;

use crate::domain::entities::UnknownVariant;
use crate::infrastructure::storage::StorageError;

/// Failures a catalog workflow can report.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("author not found")]
    AuthorNotFound,

    #[error("book not found")]
    BookNotFound,

    #[error("favourite book not found")]
    FavouriteNotFound,

    #[error("review not found")]
    ReviewNotFound,

    #[error("author already exists")]
    AuthorAlreadyExists,

    #[error("book already exists")]
    BookAlreadyExists,

    #[error("book is already in favourites")]
    FavouriteAlreadyExists,

    #[error("review for this book already exists")]
    ReviewAlreadyExists,

    #[error("user with this email already exists")]
    UserAlreadyExists,

    /// Unknown email and wrong password are reported identically.
    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("could not validate credentials")]
    Unauthorized,

    /// Constraint violation the workflow does not recognise, or a read-back
    /// that lost a relation.
    #[error("integrity error: {0}")]
    Integrity(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("security error: {0}")]
    Security(String),
}

impl From<UnknownVariant> for CatalogError {
    fn from(e: UnknownVariant) -> Self {
        CatalogError::Integrity(e.to_string())
    }
}

/// Result alias used across the domain and application layers.
pub type CatalogResult<T> = Result<T, CatalogError>;
