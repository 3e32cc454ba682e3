//! Route configuration and setup.

use crate::api_doc::get_openapi_spec;
use crate::constants::{
    API_PREFIX, AUTH_PREFIX, DEFAULT_CONCURRENCY_LIMIT, MULTIPART_OVERHEAD_BYTES,
};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use keepsake_core::{Config, StorageBackend};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Setup all application routes
///
/// Routes that only make sense for one backend are mounted only when that backend is
/// active: `/api/test-tigris` for S3, `/auth/google*` and `/api/albums` for Google Photos.
pub fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut api = Router::new()
        .route("/upload-photo", post(handlers::upload_photo::upload_photo))
        .route("/photo/{id}", get(handlers::photo::get_photo))
        .route("/timeline", get(handlers::timeline::list_timeline))
        .route("/timeline/full", get(handlers::timeline::full_timeline))
        .route("/openapi.json", get(openapi_json));

    let mut app = Router::new().route("/health", get(handlers::health::health_check));

    match state.backend() {
        StorageBackend::S3 => {
            api = api.route("/test-tigris", get(handlers::connection_test::test_tigris));
        }
        StorageBackend::GooglePhotos => {
            api = api.route(
                "/albums",
                get(handlers::albums::list_albums).post(handlers::albums::create_album),
            );
            app = app.nest(AUTH_PREFIX, google_auth_routes());
        }
    }

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let mut app = app
        .nest(API_PREFIX, api)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"));

    let static_dir = config.static_dir();
    if static_dir.is_dir() {
        tracing::info!(static_dir = %static_dir.display(), "Serving frontend build");
        let index = ServeFile::new(static_dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(static_dir).fallback(index));
    } else {
        tracing::debug!(
            static_dir = %static_dir.display(),
            "Frontend build not found; static files disabled"
        );
    }

    let app = app
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            config.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn google_auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/google", get(handlers::google_auth::authorize))
        .route("/google/url", get(handlers::google_auth::authorization_url))
        .route("/google/callback", get(handlers::google_auth::callback))
}

async fn openapi_json() -> impl IntoResponse {
    Json(get_openapi_spec())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
