//! DTOs for author endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::use_cases::CreateAuthorCommand;

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_lifespan", skip_on_field_errors = false))]
pub struct CreateAuthorRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    pub bio: Option<String>,

    pub birth_date: Option<NaiveDate>,

    pub death_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 50))]
    pub country: Option<String>,
}

fn validate_lifespan(req: &CreateAuthorRequest) -> Result<(), ValidationError> {
    match (req.birth_date, req.death_date) {
        (Some(birth), Some(death)) if death < birth => {
            Err(ValidationError::new("death_before_birth"))
        }
        _ => Ok(()),
    }
}

impl From<CreateAuthorRequest> for CreateAuthorCommand {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            name: req.name,
            bio: req.bio,
            birth_date: req.birth_date,
            death_date: req.death_date,
            country: req.country,
        }
    }
}
