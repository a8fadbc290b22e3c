//! Handlers for authors.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::deps::RequestScope;
use crate::api::dto::authors::CreateAuthorRequest;
use crate::api::middleware::AdminUser;
use crate::application::responses::AuthorResponse;
use crate::error::AppError;
use crate::infrastructure::storage::Upload;
use crate::state::AppState;

/// Image types accepted as author photos.
const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Multipart field carrying the photo.
const FILE_FIELD: &str = "file";

/// Creates an author. Admin only.
///
/// # Endpoint
///
/// `POST /v1/authors`
///
/// # Errors
///
/// - **400** - Validation failed
/// - **409** - Name already taken
pub async fn create_author_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError> {
    payload.validate()?;

    let author = RequestScope::new(&state)
        .create_author()
        .execute(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(author)))
}

/// `GET /v1/authors/{slug}`. Served from cache when possible.
pub async fn get_author_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AuthorResponse>, AppError> {
    let author = RequestScope::new(&state)
        .find_author_by_slug()
        .execute(&slug)
        .await?;

    Ok(Json(author))
}

/// Replaces an author's photo. Admin only.
///
/// # Endpoint
///
/// `PATCH /v1/authors/{id}/avatar` with a `multipart/form-data` body whose
/// `file` field holds a JPEG, PNG or WebP image.
///
/// # Errors
///
/// - **400** - Malformed body or missing `file` field
/// - **404** - Unknown author
/// - **415** - Other content types
/// - **502** - Object store rejected the upload
pub async fn update_author_avatar_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<AuthorResponse>, AppError> {
    let upload = read_image(multipart).await?;

    let author = RequestScope::new(&state)
        .update_author_photo()
        .execute(id, upload)
        .await?;

    Ok(Json(author))
}

/// `DELETE /v1/authors/{id}`. Admin only. Books of the author are kept.
pub async fn delete_author_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    RequestScope::new(&state)
        .delete_author()
        .execute(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Pulls the image out of the `file` field. Other fields are ignored.
async fn read_image(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request("Malformed multipart body", json!({ "reason": e.body_text() }))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        if !content_type
            .as_deref()
            .is_some_and(|ct| ALLOWED_IMAGE_TYPES.contains(&ct))
        {
            return Err(AppError::unsupported_media_type(
                "Unsupported image type",
                json!({ "content_type": content_type, "allowed": ALLOWED_IMAGE_TYPES }),
            ));
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            AppError::bad_request("Failed to read file", json!({ "reason": e.body_text() }))
        })?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::bad_request("Missing file", json!({ "field": FILE_FIELD })))
}
