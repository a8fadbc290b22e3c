//! Row shapes read from PostgreSQL and their conversion into entities.
//!
//! Text-backed vocabularies are parsed here; a stored value outside the
//! vocabulary is reported as an integrity error.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::entities::{
    Author, Book, FavouriteBook, Review, ReviewAuthor, Role, User,
};
use crate::domain::errors::CatalogError;

#[derive(Debug, FromRow)]
pub(super) struct AuthorRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: row.id,
            name: row.name,
            slug: row.slug,
            bio: row.bio,
            birth_date: row.birth_date,
            death_date: row.death_date,
            country: row.country,
            photo_url: row.photo_url,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub language: String,
    pub genre: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub publish_year: Option<i32>,
    pub page_count: Option<i32>,
    pub author_id: Option<Uuid>,
}

impl TryFrom<BookRow> for Book {
    type Error = CatalogError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: row.id,
            title: row.title,
            slug: row.slug,
            language: row.language,
            genre: row.genre.parse()?,
            description: row.description,
            short_description: row.short_description,
            publish_year: row.publish_year,
            page_count: row.page_count,
            author_id: row.author_id,
        })
    }
}

/// A favourite joined with its book. Favourite columns are aliased to keep
/// them apart from the book's.
#[derive(Debug, FromRow)]
pub(super) struct FavouriteRow {
    pub favourite_id: Uuid,
    pub favourite_status: String,
    #[sqlx(flatten)]
    pub book: BookRow,
}

impl TryFrom<FavouriteRow> for FavouriteBook {
    type Error = CatalogError;

    fn try_from(row: FavouriteRow) -> Result<Self, Self::Error> {
        Ok(FavouriteBook {
            id: row.favourite_id,
            status: row.favourite_status.parse()?,
            book: row.book.try_into()?,
        })
    }
}

/// A review joined with its reviewer's names and its book.
#[derive(Debug, FromRow)]
pub(super) struct ReviewRow {
    pub review_id: Uuid,
    pub review: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(flatten)]
    pub book: BookRow,
}

impl TryFrom<ReviewRow> for Review {
    type Error = CatalogError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: row.review_id,
            review: row.review,
            rating: row.rating,
            created_at: row.created_at,
            user: ReviewAuthor {
                first_name: row.first_name,
                last_name: row.last_name,
            },
            book: row.book.try_into()?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = CatalogError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            hashed_password: row.hashed_password,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role.parse::<Role>()?,
        })
    }
}

/// Column list shared by every query that returns a whole book.
pub(super) const BOOK_COLUMNS: &str = "b.id, b.title, b.slug, b.language, b.genre, \
     b.description, b.short_description, b.publish_year, b.page_count, b.author_id";
