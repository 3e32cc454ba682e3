use axum::{
    extract::{Query, State},
    Json,
};
use keepsake_core::AppError;
use keepsake_storage::google_photos::Album;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{storage_error, ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::google_auth::google_photos;
use crate::state::StorageState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AlbumsQuery {
    /// Google Photos session id
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumsResponse {
    pub success: bool,
    pub albums: Vec<Album>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub user_id: Option<String>,
    pub title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumResponse {
    pub success: bool,
    pub album: Album,
}

/// List the albums of the authorized Google Photos library
#[utoipa::path(
    get,
    path = "/api/albums",
    tag = "google-photos",
    params(AlbumsQuery),
    responses(
        (status = 200, description = "Albums", body = AlbumsResponse),
        (status = 401, description = "Google Photos session missing or expired", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(storage, query), fields(operation = "list_albums"))]
pub async fn list_albums(
    State(storage): State<StorageState>,
    Query(query): Query<AlbumsQuery>,
) -> Result<Json<AlbumsResponse>, HttpAppError> {
    let albums = google_photos(&storage)?
        .list_albums(query.user_id.as_deref())
        .await
        .map_err(storage_error("Failed to fetch albums"))?;

    Ok(Json(AlbumsResponse {
        success: true,
        albums,
    }))
}

/// Create an album in the authorized Google Photos library
#[utoipa::path(
    post,
    path = "/api/albums",
    tag = "google-photos",
    request_body = CreateAlbumRequest,
    responses(
        (status = 200, description = "Album created", body = AlbumResponse),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Google Photos session missing or expired", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(storage, body), fields(operation = "create_album"))]
pub async fn create_album(
    State(storage): State<StorageState>,
    ValidatedJson(body): ValidatedJson<CreateAlbumRequest>,
) -> Result<Json<AlbumResponse>, HttpAppError> {
    let google = google_photos(&storage)?;

    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Album title is required".to_string()).into());
    }

    let album = google
        .create_album(body.user_id.as_deref(), title)
        .await
        .map_err(storage_error("Failed to create album"))?;

    Ok(Json(AlbumResponse {
        success: true,
        album,
    }))
}
