//! Small helpers shared across layers.
//!
//! - [`slug`] - Slug generation for authors and books
//! - [`db_error`] - Unique-violation detection on `sqlx` errors

pub mod db_error;
pub mod slug;
