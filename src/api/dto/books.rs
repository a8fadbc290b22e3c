//! DTOs for book endpoints.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::use_cases::CreateBookCommand;
use crate::domain::entities::{BookFilter, BookUpdate, Genre};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 50))]
    pub title: String,

    /// Defaults to Russian when omitted.
    #[validate(length(min = 1, max = 25))]
    pub language: Option<String>,

    pub genre: Genre,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub short_description: Option<String>,

    #[validate(range(min = 0, max = 2100))]
    pub publish_year: Option<i32>,

    #[validate(range(min = 1))]
    pub page_count: Option<i32>,

    pub author_id: Option<Uuid>,
}

impl From<CreateBookRequest> for CreateBookCommand {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            language: req.language,
            genre: req.genre,
            description: req.description,
            short_description: req.short_description,
            publish_year: req.publish_year,
            page_count: req.page_count,
            author_id: req.author_id,
        }
    }
}

/// Full replacement of a book's mutable fields. Title and slug cannot change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 25))]
    pub language: Option<String>,

    pub genre: Genre,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub short_description: Option<String>,

    #[validate(range(min = 0, max = 2100))]
    pub publish_year: Option<i32>,

    #[validate(range(min = 1))]
    pub page_count: Option<i32>,

    pub author_id: Option<Uuid>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            language: req.language,
            genre: req.genre,
            description: req.description,
            short_description: req.short_description,
            publish_year: req.publish_year,
            page_count: req.page_count,
            author_id: req.author_id,
        }
    }
}

/// Query string of `GET /books`.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_ranges", skip_on_field_errors = false))]
pub struct BooksQuery {
    pub genre: Option<Genre>,

    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,

    pub year_from: Option<i32>,
    pub year_to: Option<i32>,

    #[validate(range(min = 0))]
    pub pages_from: Option<i32>,
    #[validate(range(min = 0))]
    pub pages_to: Option<i32>,
}

fn validate_ranges(query: &BooksQuery) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (query.year_from, query.year_to)
        && from > to
    {
        return Err(ValidationError::new("year_from_after_year_to"));
    }
    if let (Some(from), Some(to)) = (query.pages_from, query.pages_to)
        && from > to
    {
        return Err(ValidationError::new("pages_from_after_pages_to"));
    }
    Ok(())
}

impl From<BooksQuery> for BookFilter {
    fn from(query: BooksQuery) -> Self {
        Self {
            genre: query.genre,
            year_from: query.year_from,
            year_to: query.year_to,
            pages_from: query.pages_from,
            pages_to: query.pages_to,
            limit: query.limit,
        }
    }
}
