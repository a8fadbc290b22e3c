//! Book entity and its genre vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownVariant;

/// Language assigned to a book when none is given on creation.
pub const DEFAULT_LANGUAGE: &str = "Русский";

/// Closed set of book genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fantasy,
    ScienceFiction,
    Detective,
    Romance,
    Nonfiction,
}

impl Genre {
    /// Stored and serialized text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::ScienceFiction => "science-fiction",
            Self::Detective => "detective",
            Self::Romance => "romance",
            Self::Nonfiction => "nonfiction",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fantasy" => Ok(Self::Fantasy),
            "science-fiction" => Ok(Self::ScienceFiction),
            "detective" => Ok(Self::Detective),
            "romance" => Ok(Self::Romance),
            "nonfiction" => Ok(Self::Nonfiction),
            other => Err(UnknownVariant::new("genre", other)),
        }
    }
}

/// A catalog entry.
///
/// `author_id` becomes `None` when the author is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
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

/// Input data for creating a book.
///
/// `language: None` falls back to [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub slug: String,
    pub language: Option<String>,
    pub genre: Genre,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub publish_year: Option<i32>,
    pub page_count: Option<i32>,
    pub author_id: Option<Uuid>,
}

/// Replacement values for the mutable part of a book.
///
/// Title and slug are immutable. Every other field is overwritten, except
/// `language`, which keeps its stored value when `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    pub language: Option<String>,
    pub genre: Genre,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub publish_year: Option<i32>,
    pub page_count: Option<i32>,
    pub author_id: Option<Uuid>,
}

/// Filters for listing books. Every criterion is optional and they combine with AND.
///
/// Year and page bounds are inclusive. `limit: None` means no limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub genre: Option<Genre>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub pages_from: Option<i32>,
    pub pages_to: Option<i32>,
    pub limit: Option<i64>,
}
