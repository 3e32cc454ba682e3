//! In-memory photo storage used in place of a real bucket.

use async_trait::async_trait;
use keepsake_core::constants::DEFAULT_S3_EVENT_DESCRIPTION;
use keepsake_core::models::{PhotoUpload, StoredPhoto};
use keepsake_storage::{
    ConnectionReport, PhotoStorage, StorageBackend, StorageError, StorageResult,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MemoryPhotoStorage {
    uploads: Mutex<Vec<PhotoUpload>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryPhotoStorage {
    /// Make every subsequent provider call fail.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Number of provider calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<PhotoUpload> {
        self.uploads.lock().unwrap().clone()
    }

    fn enter(&self) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "bucket secret-bucket rejected credentials AKIA123".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PhotoStorage for MemoryPhotoStorage {
    async fn store(
        &self,
        _session: Option<&str>,
        upload: PhotoUpload,
    ) -> StorageResult<StoredPhoto> {
        self.enter()?;
        let id = format!("{}{}", uuid::Uuid::new_v4(), upload.extension());
        let photo = StoredPhoto {
            url: format!("https://bucket.test/photos/{}?X-Amz-Expires=31536000", id),
            id,
            filename: upload.original_filename.clone(),
            upload_time: upload.uploaded_at,
            media_item: None,
        };
        self.uploads.lock().unwrap().push(upload);
        Ok(photo)
    }

    async fn photo_url(
        &self,
        _session: Option<&str>,
        photo_id: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.enter()?;
        if photo_id.contains("..") {
            return Err(StorageError::InvalidKey(photo_id.to_string()));
        }
        Ok(format!(
            "https://bucket.test/photos/{}?X-Amz-Expires={}",
            photo_id,
            expires_in.as_secs()
        ))
    }

    async fn check_connection(&self) -> StorageResult<ConnectionReport> {
        self.enter()?;
        Ok(ConnectionReport {
            bucket: "photos".to_string(),
            endpoint: "https://bucket.test".to_string(),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }

    fn default_event_description(&self) -> &'static str {
        DEFAULT_S3_EVENT_DESCRIPTION
    }
}
