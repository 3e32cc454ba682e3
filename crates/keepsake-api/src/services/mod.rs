pub mod timeline_store;
pub mod upload;

pub use timeline_store::{InMemoryTimelineStore, TimelineStore};
pub use upload::{PhotoUploadService, UploadConfig, UploadOutcome};
