use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::photo::{PhotoMetadata, StoredPhoto};

/// A dated record created from a successful upload.
///
/// Events are immutable once created and live for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub year: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Provider-side reference to the photo (object name or media-item id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimelineEvent {
    /// Derive the event for a photo the provider has accepted.
    pub fn from_upload(
        photo: &StoredPhoto,
        metadata: &PhotoMetadata,
        default_description: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            year: metadata.year.clone(),
            title: metadata.title.clone(),
            description: metadata.event_description(default_description).to_string(),
            photo_url: Some(photo.url.clone()).filter(|url| !url.is_empty()),
            photo_id: Some(photo.id.clone()),
            created_at,
        }
    }
}

/// Where a presented timeline entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Fixed biographical event
    Default,
    /// Created from a photo upload
    Upload,
}

/// Timeline entry as presented to the page: defaults and uploads in one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub year: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub source: EventSource,
}

impl From<TimelineEvent> for TimelineEntry {
    fn from(event: TimelineEvent) -> Self {
        Self {
            id: event.id,
            year: event.year,
            title: event.title,
            description: event.description,
            photo_url: event.photo_url,
            photo_id: event.photo_id,
            created_at: Some(event.created_at),
            source: EventSource::Upload,
        }
    }
}
