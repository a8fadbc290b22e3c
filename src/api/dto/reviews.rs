//! DTOs for reviews.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{NewReview, ReviewUpdate};

/// Body of both creating and replacing a review.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 10, message = "Review must be at least 10 characters"))]
    pub review: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

impl From<ReviewRequest> for NewReview {
    fn from(req: ReviewRequest) -> Self {
        Self {
            review: req.review,
            rating: req.rating,
        }
    }
}

impl From<ReviewRequest> for ReviewUpdate {
    fn from(req: ReviewRequest) -> Self {
        Self {
            review: req.review,
            rating: req.rating,
        }
    }
}
