//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// OAuth consent flow prefix (Google Photos backend only)
pub const AUTH_PREFIX: &str = "/auth";

/// Multipart field carrying the image
pub const PHOTO_FIELD: &str = "photo";

/// Room for form boundaries and text fields on top of the maximum file size.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Default cap on in-flight requests
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 1_000;

