//! HTTP error type.
//!
//! Every failure leaves the API as
//! `{ "error": { "code": ..., "message": ..., "details": ... } }`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;
use validator::ValidationErrors;

use crate::domain::errors::CatalogError;
use crate::infrastructure::storage::StorageError;

#[derive(Serialize)]
struct Envelope<'a> {
    error: Payload<'a>,
}

#[derive(Serialize)]
struct Payload<'a> {
    code: &'a str,
    message: &'a str,
    details: &'a Value,
}

/// A failed request: status, machine-readable code, human message and
/// optional structured details.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Value,
}

impl AppError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: json!({}),
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message).with_details(details)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub fn unsupported_media_type(message: impl Into<String>, details: Value) -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            message,
        )
        .with_details(details)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "bad_gateway", message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Envelope {
            error: Payload {
                code: self.code,
                message: &self.message,
                details: &self.details,
            },
        };
        let mut response = (self.status, Json(body)).into_response();

        // RFC 6750 challenge for bearer tokens
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        let message = e.to_string();

        match e {
            CatalogError::AuthorNotFound
            | CatalogError::BookNotFound
            | CatalogError::FavouriteNotFound
            | CatalogError::ReviewNotFound => AppError::not_found(message),

            CatalogError::AuthorAlreadyExists
            | CatalogError::BookAlreadyExists
            | CatalogError::FavouriteAlreadyExists
            | CatalogError::ReviewAlreadyExists
            | CatalogError::UserAlreadyExists => AppError::conflict(message),

            CatalogError::InvalidCredentials => AppError::bad_request(message, json!({})),

            CatalogError::Unauthorized => AppError::unauthorized(message),

            CatalogError::Storage(StorageError::Upload(reason)) => {
                error!(%reason, "Blob upload failed");
                AppError::bad_gateway("Failed to store file")
            }

            CatalogError::Storage(_)
            | CatalogError::Integrity(_)
            | CatalogError::Database(_)
            | CatalogError::Security(_) => {
                error!(error = %message, "Request failed");
                AppError::internal()
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request", details)
    }
}
