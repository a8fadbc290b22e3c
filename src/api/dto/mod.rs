//! Data Transfer Objects for API requests.
//!
//! Request bodies are validated with `validator` before they reach a use
//! case. Responses are the application layer's response shapes.

pub mod auth;
pub mod authors;
pub mod books;
pub mod favourites;
pub mod health;
pub mod reviews;
