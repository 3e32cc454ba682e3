//! Keepsake Storage Library
//!
//! This crate provides the photo storage abstraction and its two implementations: an
//! S3-compatible bucket (Tigris by default) and a Google Photos library reached through
//! OAuth. Exactly one backend is active per process.
//!
//! # Object key format
//!
//! The S3 backend stores each photo under `photos/{uuid}{.ext}`; the `{uuid}{.ext}` part is
//! the photo id handed back to clients. Google Photos ids are media-item ids chosen by the
//! provider.

pub mod factory;
#[cfg(feature = "storage-google-photos")]
pub mod google_photos;
pub(crate) mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, StorageHandles};
#[cfg(feature = "storage-google-photos")]
pub use google_photos::GooglePhotosStorage;
pub use keepsake_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3PhotoStorage;
pub use traits::{ConnectionReport, PhotoStorage, StorageError, StorageResult};
