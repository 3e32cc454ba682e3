//! OpenAPI documentation.
//!
//! Served at `/api/openapi.json` and rendered by RapiDoc at `/docs`. Google Photos paths are
//! listed regardless of the active backend; they answer 404 when it is S3.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use keepsake_core::models;
use keepsake_storage::google_photos;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Keepsake API",
        version = "0.1.0",
        description = "Photo intake for the birthday site. Uploaded photos are stored in an S3-compatible bucket (Tigris) or a Google Photos library and become events on the site's timeline."
    ),
    paths(
        // Photos
        handlers::upload_photo::upload_photo,
        handlers::photo::get_photo,
        // Timeline
        handlers::timeline::list_timeline,
        handlers::timeline::full_timeline,
        // Google Photos
        handlers::google_auth::authorize,
        handlers::google_auth::authorization_url,
        handlers::google_auth::callback,
        handlers::albums::list_albums,
        handlers::albums::create_album,
        // Health
        handlers::health::health_check,
        handlers::connection_test::test_tigris,
    ),
    components(
        schemas(
            models::StoredPhoto,
            models::TimelineEvent,
            models::TimelineEntry,
            models::EventSource,
            google_photos::Album,
            google_photos::MediaItem,
            google_photos::AuthorizationRequest,
            handlers::upload_photo::UploadPhotoResponse,
            handlers::photo::PhotoUrlResponse,
            handlers::google_auth::CallbackResponse,
            handlers::albums::AlbumsResponse,
            handlers::albums::AlbumResponse,
            handlers::albums::CreateAlbumRequest,
            handlers::health::HealthResponse,
            handlers::connection_test::ConnectionTestResponse,
            handlers::connection_test::ConnectionTestFailure,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "photos", description = "Photo upload and lookup"),
        (name = "timeline", description = "Timeline events created from uploads"),
        (name = "google-photos", description = "Google Photos authorization and albums"),
        (name = "health", description = "Liveness and storage connectivity")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = get_openapi_spec();
        for path in [
            "/api/upload-photo",
            "/api/photo/{id}",
            "/api/timeline",
            "/api/timeline/full",
            "/auth/google",
            "/auth/google/url",
            "/auth/google/callback",
            "/api/albums",
            "/health",
            "/api/test-tigris",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
