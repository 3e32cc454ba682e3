use crate::keys::{generate_photo_id, photo_key, validate_photo_id};
use crate::traits::{ConnectionReport, PhotoStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use keepsake_core::constants::{
    CONNECTION_TEST_KEY, DEFAULT_S3_EVENT_DESCRIPTION, UPLOAD_URL_TTL,
};
use keepsake_core::models::{PhotoUpload, StoredPhoto};
use keepsake_core::S3Config;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult, RetryConfig,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::time::Duration;

/// S3-compatible photo storage (Tigris by default)
#[derive(Clone)]
pub struct S3PhotoStorage {
    store: AmazonS3,
    bucket: String,
    endpoint: String,
}

impl S3PhotoStorage {
    /// Create a new S3PhotoStorage from the bucket settings.
    ///
    /// Credentials given in the config take precedence over the ambient AWS environment.
    /// The client never retries: a failed request fails the upload that issued it.
    pub fn new(config: &S3Config) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone())
            .with_endpoint(config.endpoint.clone())
            .with_allow_http(config.allow_http())
            .with_retry(RetryConfig {
                max_retries: 0,
                ..Default::default()
            });

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key_id.clone())
                .with_secret_access_key(secret.clone());
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3PhotoStorage {
            store,
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn object_attributes(upload: &PhotoUpload) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(upload.content_type.clone()),
        );

        let metadata = [
            ("originalName", upload.original_filename.as_str()),
            ("title", upload.metadata.title.as_str()),
            ("description", upload.metadata.object_description()),
            ("year", upload.metadata.year.as_str()),
        ];
        for (name, value) in metadata {
            attributes.insert(
                Attribute::Metadata(name.into()),
                AttributeValue::from(header_safe(value)),
            );
        }
        attributes.insert(
            Attribute::Metadata("uploadTime".into()),
            AttributeValue::from(upload.uploaded_at.to_rfc3339()),
        );

        attributes
    }

    async fn signed_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Path::from(key.to_string());
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::BackendError(e.to_string()))?
            .to_string();

        Ok(url)
    }
}

/// User metadata travels as `x-amz-meta-*` headers, which only carry visible ASCII.
fn header_safe(value: &str) -> String {
    if value.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        value.to_string()
    } else {
        utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
    }
}

#[async_trait]
impl PhotoStorage for S3PhotoStorage {
    async fn store(
        &self,
        _session: Option<&str>,
        upload: PhotoUpload,
    ) -> StorageResult<StoredPhoto> {
        let photo_id = generate_photo_id(&upload.extension());
        let key = photo_key(&photo_id);
        let size = upload.size() as u64;
        let location = Path::from(key.clone());
        let options = PutOptions {
            attributes: Self::object_attributes(&upload),
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(upload.data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.signed_get_url(&key, UPLOAD_URL_TTL).await?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(StoredPhoto {
            id: photo_id,
            url,
            filename: upload.original_filename,
            upload_time: upload.uploaded_at,
            media_item: None,
        })
    }

    async fn photo_url(
        &self,
        _session: Option<&str>,
        photo_id: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        validate_photo_id(photo_id)?;
        self.signed_get_url(&photo_key(photo_id), expires_in).await
    }

    async fn check_connection(&self) -> StorageResult<ConnectionReport> {
        let start = std::time::Instant::now();
        let location = Path::from(CONNECTION_TEST_KEY);

        let result: ObjectResult<_> = self
            .store
            .put(&location, PutPayload::from_static(b"test"))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                endpoint = %self.endpoint,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 connection test failed"
            );
            StorageError::BackendError(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            endpoint = %self.endpoint,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 connection test successful"
        );

        Ok(ConnectionReport {
            bucket: self.bucket.clone(),
            endpoint: self.endpoint.clone(),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }

    fn default_event_description(&self) -> &'static str {
        DEFAULT_S3_EVENT_DESCRIPTION
    }
}
