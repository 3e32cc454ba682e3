//! Domain models for the upload-to-timeline pipeline.

pub mod photo;
pub mod timeline;

pub use photo::{PhotoMetadata, PhotoUpload, StoredPhoto};
pub use timeline::{EventSource, TimelineEntry, TimelineEvent};
