//! Image upload and metadata handlers

use crate::{ApiError, AppState};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use image_store::{ObjectMetadata, ObjectStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Prefix every uploaded object key starts with
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Content type stored when the multipart part declares none
pub const DEFAULT_UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Derive the store key for an uploaded filename
pub fn upload_key(filename: &str) -> String {
    format!("{UPLOAD_PREFIX}{filename}")
}

/// Body of a successful upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub key: String,
    pub bucket: String,
}

/// Body of a successful metadata lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageMetadataResponse {
    pub key: String,
    pub size: u64,
    pub content_type: String,
}

impl From<ObjectMetadata> for ImageMetadataResponse {
    fn from(meta: ObjectMetadata) -> Self {
        Self {
            key: meta.key,
            size: meta.size,
            content_type: meta.content_type,
        }
    }
}

struct UploadedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Pull the first `file` part that carries a filename out of the form
async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse multipart data: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A `file` part without a filename is a plain form value, not an upload
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_UPLOAD_CONTENT_TYPE)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(Some(UploadedFile {
            filename,
            content_type,
            data,
        }));
    }
    Ok(None)
}

/// POST /images/upload - Store a multipart `file` under `uploads/<filename>`
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    // Anything that is not a multipart form cannot carry a file
    let multipart = multipart.map_err(|_| ApiError::BadRequest("No file provided".to_string()))?;

    let file = read_file_field(multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

    if file.filename.is_empty() {
        return Err(ApiError::BadRequest("Empty filename".to_string()));
    }

    let key = upload_key(&file.filename);
    let bucket = state.bucket();

    tracing::debug!(key = %key, size = file.data.len(), content_type = %file.content_type, "Uploading image");
    state
        .store
        .upload(bucket, &key, file.data, &file.content_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, key = %key, bucket = %bucket, "Failed to upload image");
            e
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Upload successful".to_string(),
            key,
            bucket: bucket.to_string(),
        }),
    )
        .into_response())
}

/// GET /images/{*image_id} - Look up size and content type of a stored object
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Response, ApiError> {
    image_metadata(&state, &image_id).await
}

/// GET /images/upload - The upload route shadows this key for GET requests
pub async fn get_upload_image(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    image_metadata(&state, "upload").await
}

async fn image_metadata(state: &AppState, key: &str) -> Result<Response, ApiError> {
    match state.store.get_metadata(state.bucket(), key).await {
        Ok(meta) => Ok(Json(ImageMetadataResponse::from(meta)).into_response()),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound("Image not found".to_string())),
        Err(e) => {
            tracing::error!(error = %e, key = %key, "Failed to fetch image metadata");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key() {
        assert_eq!(upload_key("cat.png"), "uploads/cat.png");
        assert_eq!(upload_key("nested/dir/cat.png"), "uploads/nested/dir/cat.png");
        assert_eq!(upload_key("../escape.png"), "uploads/../escape.png");
        assert!(upload_key("x").starts_with(UPLOAD_PREFIX));
    }

    #[test]
    fn test_metadata_response_from_store() {
        let response = ImageMetadataResponse::from(ObjectMetadata {
            key: "uploads/cat.png".to_string(),
            size: 42,
            content_type: "image/png".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key": "uploads/cat.png", "size": 42, "content_type": "image/png" })
        );
    }
}
