//! Review entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Book;

/// Public identity of a reviewer, as shown next to a review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// A user's review of a book, read back with both relations loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub review: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub user: ReviewAuthor,
    pub book: Book,
}

/// Input data for creating a review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub review: String,
    pub rating: i32,
}

/// Replacement text and rating for an existing review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub review: String,
    pub rating: i32,
}
