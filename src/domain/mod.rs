//! Domain layer: entities, errors and the contracts infrastructure implements.
//!
//! # Architecture
//!
//! - [`entities`] - Catalog data structures
//! - [`errors`] - [`errors::CatalogError`], the error every workflow reports
//! - [`repositories`] - Data access trait definitions
//! - [`unit_of_work`] - Transactional scope over a request's repositories
//!
//! Workflows built on these contracts live in [`crate::application`].

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod unit_of_work;

pub use errors::{CatalogError, CatalogResult};
pub use unit_of_work::{UnitOfWork, in_unit_of_work};

#[cfg(test)]
pub use unit_of_work::MockUnitOfWork;
