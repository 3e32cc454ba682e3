#[cfg(feature = "storage-google-photos")]
use crate::GooglePhotosStorage;
#[cfg(feature = "storage-s3")]
use crate::S3PhotoStorage;
use crate::{PhotoStorage, StorageBackend, StorageError, StorageResult};
use keepsake_core::Config;
use std::sync::Arc;

/// The active backend, plus the Google Photos handle when that backend is selected.
///
/// The OAuth and album routes need the concrete Google Photos type; everything else goes
/// through the trait object.
#[derive(Clone)]
pub struct StorageHandles {
    pub photos: Arc<dyn PhotoStorage>,
    #[cfg(feature = "storage-google-photos")]
    pub google_photos: Option<Arc<GooglePhotosStorage>>,
}

impl StorageHandles {
    pub fn backend_type(&self) -> StorageBackend {
        self.photos.backend_type()
    }
}

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<StorageHandles> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let storage = S3PhotoStorage::new(config.s3())?;
            tracing::info!(
                bucket = %storage.bucket(),
                endpoint = %storage.endpoint(),
                "Using S3-compatible photo storage"
            );
            Ok(StorageHandles {
                photos: Arc::new(storage),
                #[cfg(feature = "storage-google-photos")]
                google_photos: None,
            })
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-google-photos")]
        StorageBackend::GooglePhotos => {
            let google_config = config.google_photos().ok_or_else(|| {
                StorageError::ConfigError(
                    "GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI not configured"
                        .to_string(),
                )
            })?;
            let storage = Arc::new(GooglePhotosStorage::new(google_config)?);
            tracing::info!(
                api_base = %google_config.api_base,
                "Using Google Photos storage"
            );
            Ok(StorageHandles {
                photos: storage.clone(),
                google_photos: Some(storage),
            })
        }

        #[cfg(not(feature = "storage-google-photos"))]
        StorageBackend::GooglePhotos => Err(StorageError::ConfigError(
            "Google Photos backend not available (storage-google-photos feature not enabled)"
                .to_string(),
        )),
    }
}
