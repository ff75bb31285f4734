//! Axum route handlers for resume and photo uploads.

use axum::{
    extract::{Multipart, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{photo_key, resume_key};

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PHOTO_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

struct Upload {
    bytes: Bytes,
    content_type: Option<String>,
}

/// Reads the named part from a multipart body.
async fn read_part(multipart: &mut Multipart, name: &str) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(name) {
            let content_type = field.content_type().map(String::from);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read {name} upload: {e}")))?;
            return Ok(Upload {
                bytes,
                content_type,
            });
        }
    }
    Err(AppError::Validation(format!("Missing '{name}' file part")))
}

fn check_resume(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Resume file is empty".to_string()));
    }
    if !bytes.starts_with(b"%PDF") {
        return Err(AppError::Validation("Resume must be a PDF file".to_string()));
    }
    Ok(())
}

fn check_photo(upload: &Upload) -> Result<&str, AppError> {
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Photo file is empty".to_string()));
    }
    upload
        .content_type
        .as_deref()
        .filter(|ct| PHOTO_CONTENT_TYPES.contains(ct))
        .ok_or_else(|| AppError::Validation("Photo must be PNG, JPEG or WebP".to_string()))
}

/// PUT /api/v1/documents/resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let upload = read_part(&mut multipart, "resume").await?;
    check_resume(&upload.bytes)?;

    state
        .storage
        .put(&resume_key(user_id), upload.bytes, PDF_CONTENT_TYPE)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/documents/resume
pub async fn handle_download_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let object = state.storage.get(&resume_key(user_id)).await?;
    Ok(([(CONTENT_TYPE, PDF_CONTENT_TYPE.to_string())], object.bytes))
}

/// PUT /api/v1/documents/photo
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let upload = read_part(&mut multipart, "photo").await?;
    let content_type = check_photo(&upload)?.to_string();

    state
        .storage
        .put(&photo_key(user_id), upload.bytes, &content_type)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/documents/photo
pub async fn handle_download_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let object = state.storage.get(&photo_key(user_id)).await?;
    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(CONTENT_TYPE, content_type)], object.bytes))
}
