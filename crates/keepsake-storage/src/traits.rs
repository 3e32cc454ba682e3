//! Storage abstraction trait
//!
//! This module defines the PhotoStorage trait that both storage backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use keepsake_core::models::{PhotoUpload, StoredPhoto};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// No session, or a session id that is not in the session map
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// OAuth `state` that was never issued or was already consumed
    #[error("Invalid authorization state: {0}")]
    InvalidState(String),

    /// Non-success response from the photo provider
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not supported by the {0} backend")]
    Unsupported(StorageBackend),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a successful connectivity canary write.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConnectionReport {
    pub bucket: String,
    pub endpoint: String,
}

/// Photo storage abstraction
///
/// Both backends (S3-compatible bucket, Google Photos) implement this trait so the upload
/// pipeline never depends on which provider is active. `session` is the Google Photos
/// session id; the S3 backend ignores it.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Send the photo to the provider and return a reference to it
    async fn store(&self, session: Option<&str>, upload: PhotoUpload) -> StorageResult<StoredPhoto>;

    /// Resolve a URL through which the client can fetch a stored photo
    async fn photo_url(
        &self,
        session: Option<&str>,
        photo_id: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Write a small canary object to prove the provider is reachable
    async fn check_connection(&self) -> StorageResult<ConnectionReport> {
        Err(StorageError::Unsupported(self.backend_type()))
    }

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Description given to timeline events when the uploader supplied none
    fn default_event_description(&self) -> &'static str;
}
