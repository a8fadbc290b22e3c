//! PostgreSQL repository implementations.
//!
//! Every repository is built over a shared [`PgSession`], so repositories
//! created for one request see and write through the same transaction.
//! Queries are checked at runtime and decoded into the row structs in
//! `rows`.
//!
//! # Repositories
//!
//! - [`PgAuthorRepository`] - Authors and photo URLs
//! - [`PgBookRepository`] - Books and filtered listing
//! - [`PgFavouriteBookRepository`] - Favourites with reading status
//! - [`PgReviewRepository`] - Reviews with reviewer names
//! - [`PgUserRepository`] - Accounts
//!
//! Creates run inside a savepoint so a constraint violation leaves the
//! surrounding transaction usable.

mod rows;

pub mod pg_author_repository;
pub mod pg_book_repository;
pub mod pg_favourite_repository;
pub mod pg_review_repository;
pub mod pg_user_repository;
pub mod session;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_book_repository::PgBookRepository;
pub use pg_favourite_repository::PgFavouriteBookRepository;
pub use pg_review_repository::PgReviewRepository;
pub use pg_user_repository::PgUserRepository;
pub use session::PgSession;
