//! Author entity.

use chrono::NaiveDate;
use uuid::Uuid;

/// A writer in the catalog.
///
/// `name` and `slug` are both unique. The slug is derived from the name at
/// creation time and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
}

/// Input data for creating an author. The slug is computed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub country: Option<String>,
}
