//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p keepsake-api`. Provider traffic goes either to
//! [`storage::MemoryPhotoStorage`] or to a wiremock server standing in for Google.

#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use keepsake_api::constants;
use keepsake_api::services::{InMemoryTimelineStore, TimelineStore};
use keepsake_api::setup::routes;
use keepsake_api::state::{AppState, StorageState};
use keepsake_core::{Config, KeepsakeConfig};
use keepsake_storage::{GooglePhotosStorage, PhotoStorage};
use std::collections::HashMap;
use std::sync::Arc;
use storage::MemoryPhotoStorage;
use wiremock::MockServer;

/// API path prefix for tests (e.g. `/api/timeline`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Configuration built from explicit variables only; the process environment is ignored.
pub fn create_test_config(vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("STATIC_DIR".to_string(), "/nonexistent/keepsake-dist".to_string()),
        ("MAX_FILE_SIZE_MB".to_string(), "1".to_string()),
    ]);
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    let config = KeepsakeConfig::from_lookup(|key| map.get(key).cloned())
        .expect("test configuration should parse");
    Config(Box::new(config))
}

pub fn build_app(config: Config, storage: StorageState) -> TestApp {
    let timeline: Arc<dyn TimelineStore> = Arc::new(InMemoryTimelineStore::new());
    let state = Arc::new(AppState::new(config.clone(), storage, timeline));
    let router = routes::setup_routes(&config, state.clone()).expect("routes should build");
    let server = TestServer::new(router).expect("test server should start");
    TestApp { server, state }
}

/// App on the S3 backend with an in-memory bucket.
pub fn setup_s3_app() -> (TestApp, Arc<MemoryPhotoStorage>) {
    setup_s3_app_with(&[])
}

pub fn setup_s3_app_with(vars: &[(&str, &str)]) -> (TestApp, Arc<MemoryPhotoStorage>) {
    let bucket = Arc::new(MemoryPhotoStorage::default());
    let storage = StorageState {
        photos: bucket.clone(),
        google_photos: None,
    };
    (build_app(create_test_config(vars), storage), bucket)
}

/// App on the Google Photos backend, with every Google endpoint served by `server`.
pub fn setup_google_app(server: &MockServer) -> (TestApp, Arc<GooglePhotosStorage>) {
    let token_url = format!("{}/token", server.uri());
    let api_base = server.uri();
    let config = create_test_config(&[
        ("STORAGE_BACKEND", "google-photos"),
        ("GOOGLE_CLIENT_ID", "client-id"),
        ("GOOGLE_CLIENT_SECRET", "client-secret"),
        ("GOOGLE_REDIRECT_URI", "http://localhost:3001/auth/google/callback"),
        ("GOOGLE_AUTH_URL", "https://accounts.example.test/o/oauth2/v2/auth"),
        ("GOOGLE_TOKEN_URL", token_url.as_str()),
        ("GOOGLE_PHOTOS_API_BASE", api_base.as_str()),
    ]);
    let google = Arc::new(
        GooglePhotosStorage::new(config.google_photos().expect("google config"))
            .expect("google storage should build"),
    );
    let photos: Arc<dyn PhotoStorage> = google.clone();
    let storage = StorageState {
        photos,
        google_photos: Some(google.clone()),
    };
    (build_app(config, storage), google)
}

pub fn jpeg_part(filename: &str) -> Part {
    Part::bytes(b"\xFF\xD8\xFF\xE0fake-jpeg".to_vec())
        .file_name(filename)
        .mime_type("image/jpeg")
}

/// Multipart form with a photo and the given text fields.
pub fn photo_form(fields: &[(&str, &str)]) -> MultipartForm {
    let mut form = MultipartForm::new().add_part("photo", jpeg_part("cake.jpg"));
    for (name, value) in fields {
        form = form.add_text(name.to_string(), value.to_string());
    }
    form
}

pub fn current_year() -> String {
    use chrono::Datelike;
    chrono::Utc::now().year().to_string()
}
