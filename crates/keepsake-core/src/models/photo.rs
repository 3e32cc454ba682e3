use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{DEFAULT_OBJECT_DESCRIPTION, DEFAULT_TITLE};

/// Descriptive metadata supplied with an upload, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoMetadata {
    pub title: String,
    /// `None` when the client did not send a description; each consumer picks its own default.
    pub description: Option<String>,
    pub year: String,
}

impl PhotoMetadata {
    /// Apply the upload defaults: placeholder title, no description, current year.
    ///
    /// Blank strings are treated the same as missing fields.
    pub fn resolve(
        title: Option<String>,
        description: Option<String>,
        year: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            title: non_blank(title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: non_blank(description),
            year: non_blank(year).unwrap_or_else(|| now.year().to_string()),
        }
    }

    /// Description attached to the stored object.
    pub fn object_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(DEFAULT_OBJECT_DESCRIPTION)
    }

    /// Description for the timeline event, falling back to a backend-specific default.
    pub fn event_description<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description.as_deref().unwrap_or(fallback)
    }
}

/// A single validated image on its way to a storage provider.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
    pub metadata: PhotoMetadata,
    pub uploaded_at: DateTime<Utc>,
}

impl PhotoUpload {
    /// File extension of the original filename including the leading dot (".jpg"),
    /// or an empty string when there is none.
    pub fn extension(&self) -> String {
        let name = self.original_filename.as_str();
        match name.rfind('.') {
            // A leading dot marks a hidden file, not an extension.
            Some(idx) if idx > 0 && idx + 1 < name.len() => name[idx..].to_lowercase(),
            _ => String::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Reference to a photo held by a storage provider.
///
/// Serialized as the `photo` acknowledgement of an S3 upload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredPhoto {
    /// Object name (`{uuid}.ext`) or Google Photos media-item id
    pub id: String,
    /// Signed URL or provider-hosted URL
    pub url: String,
    /// Original filename as uploaded
    pub filename: String,
    pub upload_time: DateTime<Utc>,
    /// Raw media item returned by Google Photos, if that backend stored the photo
    #[serde(skip)]
    pub media_item: Option<serde_json::Value>,
}
