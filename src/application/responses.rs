//! Response shapes returned by use cases.
//!
//! These are the serialized form of the catalog, shared by the HTTP layer
//! and the cache: a cached payload is exactly one of these structs as JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    Author, Book, FavouriteBook, Genre, ReadingStatus, Review, Role, User,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            slug: author.slug,
            bio: author.bio,
            birth_date: author.birth_date,
            death_date: author.death_date,
            country: author.country,
            photo_url: author.photo_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub language: String,
    pub genre: Genre,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub publish_year: Option<i32>,
    pub page_count: Option<i32>,
    pub author_id: Option<Uuid>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            slug: book.slug,
            language: book.language,
            genre: book.genre,
            description: book.description,
            short_description: book.short_description,
            publish_year: book.publish_year,
            page_count: book.page_count,
            author_id: book.author_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteBookResponse {
    pub id: Uuid,
    pub status: ReadingStatus,
    pub book: BookResponse,
}

impl From<FavouriteBook> for FavouriteBookResponse {
    fn from(favourite: FavouriteBook) -> Self {
        Self {
            id: favourite.id,
            status: favourite.status,
            book: favourite.book.into(),
        }
    }
}

/// A review with its author flattened to a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub review: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    /// `"{first_name} {last_name}"` of the reviewer.
    pub author: String,
    pub book: BookResponse,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            author: format!("{} {}", review.user.first_name, review.user.last_name),
            review: review.review,
            rating: review.rating,
            created_at: review.created_at,
            book: review.book.into(),
        }
    }
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
