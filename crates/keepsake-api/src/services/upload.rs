//! Upload pipeline: validate the form, hand the photo to storage, record the timeline event.
//!
//! The event is appended only after the provider has accepted the photo, so a failed
//! upload never leaves a partial event behind.

use std::sync::Arc;

use chrono::Utc;
use keepsake_core::models::{PhotoMetadata, PhotoUpload, StoredPhoto, TimelineEvent};
use keepsake_core::timeline::validate_year;
use keepsake_core::AppError;
use keepsake_storage::PhotoStorage;

use crate::error::{storage_error, HttpAppError};
use crate::services::timeline_store::TimelineStore;
use crate::utils::upload::{
    sanitize_filename, validate_content_type, validate_file_size, PhotoForm,
};

const UPLOAD_FAILED: &str = "Failed to upload photo";

/// Limits applied to every upload
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
}

/// Result of a completed upload
#[derive(Debug)]
pub struct UploadOutcome {
    pub photo: StoredPhoto,
    pub timeline_event: TimelineEvent,
}

pub struct PhotoUploadService {
    storage: Arc<dyn PhotoStorage>,
    timeline: Arc<dyn TimelineStore>,
    config: UploadConfig,
}

impl PhotoUploadService {
    pub fn new(
        storage: Arc<dyn PhotoStorage>,
        timeline: Arc<dyn TimelineStore>,
        config: UploadConfig,
    ) -> Self {
        Self {
            storage,
            timeline,
            config,
        }
    }

    /// Turn a submitted form into a validated upload, applying defaults.
    pub fn prepare(&self, form: PhotoForm) -> Result<(PhotoUpload, Option<String>), AppError> {
        let data = form
            .data
            .filter(|data| !data.is_empty())
            .ok_or(AppError::MissingFile)?;

        validate_file_size(data.len(), self.config.max_file_size)?;

        let content_type = validate_content_type(
            form.content_type
                .as_deref()
                .unwrap_or("application/octet-stream"),
            &self.config.allowed_content_types,
        )?;

        if let Some(ref year) = form.year {
            validate_year(year)?;
        }

        let original_filename = sanitize_filename(form.filename.as_deref().unwrap_or("photo"));
        let now = Utc::now();

        let upload = PhotoUpload {
            data,
            original_filename,
            content_type,
            metadata: PhotoMetadata::resolve(form.title, form.description, form.year, now),
            uploaded_at: now,
        };

        Ok((upload, form.user_id))
    }

    pub async fn upload(&self, form: PhotoForm) -> Result<UploadOutcome, HttpAppError> {
        let (upload, session) = self.prepare(form)?;
        let metadata = upload.metadata.clone();
        let size = upload.size();

        tracing::debug!(
            filename = %upload.original_filename,
            content_type = %upload.content_type,
            size_bytes = size,
            year = %metadata.year,
            backend = %self.storage.backend_type(),
            "Storing uploaded photo"
        );

        let photo = self
            .storage
            .store(session.as_deref(), upload)
            .await
            .map_err(storage_error(UPLOAD_FAILED))?;

        let timeline_event = TimelineEvent::from_upload(
            &photo,
            &metadata,
            self.storage.default_event_description(),
            Utc::now(),
        );
        self.timeline.append(timeline_event.clone()).await;

        tracing::info!(
            photo_id = %photo.id,
            event_id = %timeline_event.id,
            year = %timeline_event.year,
            size_bytes = size,
            "Photo uploaded and added to timeline"
        );

        Ok(UploadOutcome {
            photo,
            timeline_event,
        })
    }
}
