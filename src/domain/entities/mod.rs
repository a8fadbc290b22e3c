//! Core domain entities of the catalog.
//!
//! Entities are plain data. Creation inputs live next to the entity they
//! produce (`NewAuthor`, `NewBook`, ...) and partial updates use `*Update`
//! structs.
//!
//! # Entity Types
//!
//! - [`Author`] - A writer, addressed by slug
//! - [`Book`] - A catalog entry, optionally attributed to an author
//! - [`FavouriteBook`] - A user's bookmark with a reading status
//! - [`Review`] - A user's rated review of a book
//! - [`User`] - A registered account
//!
//! Closed vocabularies ([`Genre`], [`ReadingStatus`], [`Role`]) are stored as
//! text and parsed back through [`std::str::FromStr`].

pub mod author;
pub mod book;
pub mod favourite;
pub mod review;
pub mod user;

pub use author::{Author, NewAuthor};
pub use book::{Book, BookFilter, BookUpdate, DEFAULT_LANGUAGE, Genre, NewBook};
pub use favourite::{FavouriteBook, ReadingStatus};
pub use review::{NewReview, Review, ReviewAuthor, ReviewUpdate};
pub use user::{NewUser, Role, User};

/// A stored text value did not match any variant of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
