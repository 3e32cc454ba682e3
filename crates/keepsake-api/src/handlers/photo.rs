use axum::{
    extract::{Path, Query, State},
    Json,
};
use keepsake_core::constants::LOOKUP_URL_TTL;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{storage_error, ErrorResponse, HttpAppError};
use crate::state::StorageState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PhotoQuery {
    /// Google Photos session id (ignored by the S3 backend)
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoUrlResponse {
    pub success: bool,
    pub url: String,
    pub id: String,
}

/// Resolve a fresh URL for a stored photo
///
/// The S3 backend signs a one-hour GET URL for `photos/{id}`; the Google Photos backend
/// looks up the media item and returns its hosted URL.
#[utoipa::path(
    get,
    path = "/api/photo/{id}",
    tag = "photos",
    params(
        ("id" = String, Path, description = "Photo id (`{uuid}.ext` or media-item id)"),
        PhotoQuery
    ),
    responses(
        (status = 200, description = "Photo URL", body = PhotoUrlResponse),
        (status = 400, description = "Invalid photo id", body = ErrorResponse),
        (status = 401, description = "Google Photos session missing or expired", body = ErrorResponse),
        (status = 404, description = "Photo not found", body = ErrorResponse),
        (status = 500, description = "Storage provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(storage, query), fields(operation = "get_photo"))]
pub async fn get_photo(
    State(storage): State<StorageState>,
    Path(id): Path<String>,
    Query(query): Query<PhotoQuery>,
) -> Result<Json<PhotoUrlResponse>, HttpAppError> {
    let url = storage
        .photos
        .photo_url(query.user_id.as_deref(), &id, LOOKUP_URL_TTL)
        .await
        .map_err(storage_error("Failed to get photo"))?;

    Ok(Json(PhotoUrlResponse {
        success: true,
        url,
        id,
    }))
}
