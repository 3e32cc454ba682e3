//! Object key generation for the S3 backend.
//!
//! Key format: `photos/{photo_id}` where `photo_id` is `{uuid}{.ext}`.

use keepsake_core::constants::PHOTO_KEY_PREFIX;
use uuid::Uuid;

use crate::{StorageError, StorageResult};

/// Generate a fresh photo id keeping the original extension (".jpg" or "").
pub fn generate_photo_id(extension: &str) -> String {
    format!("{}{}", Uuid::new_v4(), extension)
}

/// Object key for a photo id.
pub fn photo_key(photo_id: &str) -> String {
    format!("{}/{}", PHOTO_KEY_PREFIX, photo_id)
}

/// Reject ids that could escape the photo prefix.
pub fn validate_photo_id(photo_id: &str) -> StorageResult<()> {
    if photo_id.is_empty()
        || photo_id.contains('/')
        || photo_id.contains('\\')
        || photo_id.contains("..")
    {
        return Err(StorageError::InvalidKey(photo_id.to_string()));
    }
    Ok(())
}
