//! One workflow per struct.
//!
//! Use cases are generic over the repository traits and the unit of work, and
//! hold the cache, blob store and security services as trait objects. They are
//! built per request by [`crate::api::deps::RequestScope`].

pub mod authors;
pub mod books;
pub mod favourites;
pub mod reviews;
pub mod users;

pub use authors::{
    CreateAuthor, CreateAuthorCommand, DeleteAuthor, FindAuthorBySlug, UpdateAuthorPhoto,
};
pub use books::{CreateBook, CreateBookCommand, DeleteBook, FindBookBySlug, GetBooks, UpdateBook};
pub use favourites::{AddFavourite, DeleteFavourite, FindFavourites, UpdateFavouriteStatus};
pub use reviews::{CreateReview, DeleteReview, FindReviews, UpdateReview};
pub use users::{AuthenticateUser, LogIn, Register, RegisterCommand};

use crate::domain::entities::Book;
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::BookRepository;

/// Resolves the book a favourite or review refers to.
async fn book_for_slug<B: BookRepository>(books: &B, slug: &str) -> CatalogResult<Book> {
    books
        .find_by_slug(slug)
        .await?
        .ok_or(CatalogError::BookNotFound)
}
