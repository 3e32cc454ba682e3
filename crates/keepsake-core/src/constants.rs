//! Shared constants for uploads and signed URLs.

use std::time::Duration;

/// Key prefix under which uploaded photos are stored in the bucket.
pub const PHOTO_KEY_PREFIX: &str = "photos";

/// Title used when an upload does not provide one.
pub const DEFAULT_TITLE: &str = "Photo Upload";

/// Description attached to the stored object when the upload does not provide one.
pub const DEFAULT_OBJECT_DESCRIPTION: &str = "Photo uploaded via Birthday Timeline App";

/// Timeline description for S3 uploads without a description.
pub const DEFAULT_S3_EVENT_DESCRIPTION: &str = "Photo uploaded to Tigris storage";

/// Timeline description for Google Photos uploads without a description.
pub const DEFAULT_GOOGLE_EVENT_DESCRIPTION: &str = "Photo uploaded to Google Photos";

/// Signed URL lifetime embedded in timeline events at upload time (one year).
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(3600 * 24 * 365);

/// Signed URL lifetime for the single-photo lookup endpoint (one hour).
pub const LOOKUP_URL_TTL: Duration = Duration::from_secs(3600);

/// Object key written by the connectivity check.
pub const CONNECTION_TEST_KEY: &str = "test-connection";

/// Default Tigris endpoint.
pub const DEFAULT_S3_ENDPOINT: &str = "https://fly.storage.tigris.dev";
