use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use keepsake_core::models::{StoredPhoto, TimelineEvent};
use keepsake_core::StorageBackend;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::UploadOutcome;
use crate::state::AppState;
use crate::utils::upload::extract_photo_form;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoResponse {
    pub success: bool,
    /// Set by the S3 backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<StoredPhoto>,
    /// Set by the Google Photos backend
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub media_item: Option<serde_json::Value>,
    pub timeline_event: TimelineEvent,
    pub message: String,
}

impl UploadPhotoResponse {
    fn new(outcome: UploadOutcome, backend: StorageBackend) -> Self {
        let UploadOutcome {
            mut photo,
            timeline_event,
        } = outcome;

        match backend {
            StorageBackend::S3 => Self {
                success: true,
                photo: Some(photo),
                media_item: None,
                timeline_event,
                message: "Photo uploaded successfully to Tigris".to_string(),
            },
            StorageBackend::GooglePhotos => Self {
                success: true,
                photo: None,
                media_item: photo.media_item.take(),
                timeline_event,
                message: "Photo uploaded successfully to Google Photos".to_string(),
            },
        }
    }
}

/// Upload photo handler
///
/// Accepts one image in the `photo` field plus optional `title`, `description`, `year`
/// and, for Google Photos, the `userId` session. On success the photo is stored with the
/// active provider and a timeline event is created from it.
///
/// # Errors
/// - `AppError::MissingFile` - No `photo` field, or an empty one
/// - `AppError::InvalidInput` - Not an allowed image type, or a non-integer year
/// - `AppError::PayloadTooLarge` - File exceeds size limit
/// - `AppError::Unauthorized` - Missing or unknown Google Photos session
/// - `AppError::SessionExpired` - Google Photos session expired and could not be refreshed
/// - `AppError::Provider` - Storage provider failure
#[utoipa::path(
    post,
    path = "/api/upload-photo",
    tag = "photos",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo uploaded and added to the timeline", body = UploadPhotoResponse),
        (status = 400, description = "No file, or invalid input", body = ErrorResponse),
        (status = 401, description = "Google Photos session missing or expired", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photo"))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadPhotoResponse>, HttpAppError> {
    let form = extract_photo_form(multipart).await?;
    let outcome = state.upload_service().upload(form).await?;

    Ok(Json(UploadPhotoResponse::new(outcome, state.backend())))
}
