//! DTOs for favourite books.

use serde::Deserialize;

use crate::domain::entities::ReadingStatus;

#[derive(Debug, Deserialize)]
pub struct UpdateFavouriteRequest {
    pub status: ReadingStatus,
}
