//! Keepsake Core Library
//!
//! This crate provides core domain models, error types, configuration, and the timeline
//! ordering rules shared across all Keepsake components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod timeline;

// Re-export commonly used types
pub use config::{BaseConfig, Config, GooglePhotosConfig, KeepsakeConfig, S3Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
// Note: PhotoStorage, StorageError, StorageResult live in keepsake-storage
