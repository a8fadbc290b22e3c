//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Implementations live in
//! `crate::infrastructure::persistence` and share one per-request session, so
//! every call made inside a unit of work runs in the same transaction.
//!
//! # Available Repositories
//!
//! - [`AuthorRepository`] - Authors and their photos
//! - [`BookRepository`] - Book CRUD and filtered listing
//! - [`FavouriteBookRepository`] - Per-user bookmarks with reading status
//! - [`ReviewRepository`] - One review per user and book
//! - [`UserRepository`] - Accounts
//!
//! # Testing
//!
//! Mock implementations are generated by `mockall` under `cfg(test)`. See
//! `tests/repository_*.rs` for the PostgreSQL behaviour.

pub mod author_repository;
pub mod book_repository;
pub mod favourite_repository;
pub mod review_repository;
pub mod user_repository;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use favourite_repository::FavouriteBookRepository;
pub use review_repository::ReviewRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use favourite_repository::MockFavouriteBookRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
