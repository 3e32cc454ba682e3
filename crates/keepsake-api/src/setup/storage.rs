//! Storage setup and initialization

use anyhow::{Context, Result};
use keepsake_core::Config;
use keepsake_storage::create_storage;

use crate::state::StorageState;

pub fn setup_storage(config: &Config) -> Result<StorageState> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage backend...");

    let handles = create_storage(config).context("Failed to initialize storage backend")?;

    match handles.backend_type() {
        keepsake_core::StorageBackend::S3 => tracing::info!(
            bucket = %config.s3().bucket,
            endpoint = %config.s3().endpoint,
            "Photos will be stored in S3-compatible bucket"
        ),
        keepsake_core::StorageBackend::GooglePhotos => {
            tracing::info!("Photos will be stored in Google Photos; authorize via /auth/google")
        }
    }

    Ok(handles.into())
}
