//! Application state and sub-state extractors.
//!
//! Everything shared between requests is created once in `setup` and owned here: the
//! active storage backend, the timeline store, and (for Google Photos) the OAuth sessions
//! held by the Google Photos handle.

use crate::services::{PhotoUploadService, TimelineStore, UploadConfig};
use keepsake_core::{Config, StorageBackend};
use keepsake_storage::{GooglePhotosStorage, PhotoStorage, StorageHandles};
use std::sync::Arc;

#[derive(Clone)]
pub struct StorageState {
    pub photos: Arc<dyn PhotoStorage>,
    /// Present only when the Google Photos backend is active
    pub google_photos: Option<Arc<GooglePhotosStorage>>,
}

impl From<StorageHandles> for StorageState {
    fn from(handles: StorageHandles) -> Self {
        Self {
            photos: handles.photos,
            google_photos: handles.google_photos,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: StorageState,
    pub timeline: Arc<dyn TimelineStore>,
    pub upload: UploadConfig,
    pub is_production: bool,
}

impl AppState {
    pub fn new(config: Config, storage: StorageState, timeline: Arc<dyn TimelineStore>) -> Self {
        let upload = UploadConfig {
            max_file_size: config.max_file_size_bytes(),
            allowed_content_types: config.allowed_content_types().to_vec(),
        };
        let is_production = config.is_production();

        Self {
            config,
            storage,
            timeline,
            upload,
            is_production,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.storage.photos.backend_type()
    }

    pub fn upload_service(&self) -> PhotoUploadService {
        PhotoUploadService::new(
            self.storage.photos.clone(),
            self.timeline.clone(),
            self.upload.clone(),
        )
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for StorageState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.storage.clone()
    }
}
