//! Configuration module
//!
//! This module provides configuration structures for the API server: the shared HTTP
//! settings, the S3-compatible bucket, and the Google Photos OAuth client.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_S3_ENDPOINT;
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 3001;
const MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp,image/heic";
const DEFAULT_BUCKET: &str = "photos";
const DEFAULT_REGION: &str = "auto";
const DEFAULT_STATIC_DIR: &str = "dist";

pub const GOOGLE_PHOTOS_API_BASE: &str = "https://photoslibrary.googleapis.com";
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Settings shared by every backend
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    /// Prebuilt frontend served for unknown GET paths
    pub static_dir: PathBuf,
    /// `LOG_FORMAT=json` switches tracing output to one JSON object per line
    pub log_json: bool,
}

/// S3-compatible bucket (Tigris by default)
#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Plain-HTTP endpoints are only used against local emulators
    pub fn allow_http(&self) -> bool {
        self.endpoint.starts_with("http://")
    }
}

/// Google OAuth client and Photos Library API endpoints
#[derive(Clone, Debug)]
pub struct GooglePhotosConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
    pub auth_url: String,
    pub token_url: String,
}

#[derive(Clone, Debug)]
pub struct KeepsakeConfig {
    pub base: BaseConfig,
    pub storage_backend: StorageBackend,
    pub s3: S3Config,
    /// Present only when all three OAuth client variables are set
    pub google_photos: Option<GooglePhotosConfig>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<KeepsakeConfig>);

impl Config {
    fn inner(&self) -> &KeepsakeConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = KeepsakeConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().base.max_file_size_bytes
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.inner().base.allowed_content_types
    }

    pub fn static_dir(&self) -> &std::path::Path {
        &self.inner().base.static_dir
    }

    pub fn log_json(&self) -> bool {
        self.inner().base.log_json
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3(&self) -> &S3Config {
        &self.inner().s3
    }

    pub fn google_photos(&self) -> Option<&GooglePhotosConfig> {
        self.inner().google_photos.as_ref()
    }
}

fn is_production(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl KeepsakeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .or_else(|| var("NODE_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = var("MAX_FILE_SIZE_MB")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_content_types = var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|| DEFAULT_ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_content_types,
            static_dir: PathBuf::from(
                var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            log_json: var("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value
                .parse::<StorageBackend>()
                .map_err(|e| anyhow::anyhow!("STORAGE_BACKEND: {}", e))?,
            None => StorageBackend::S3,
        };

        let s3 = S3Config {
            bucket: var("BUCKET_NAME").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint: var("AWS_ENDPOINT_URL_S3").unwrap_or_else(|| DEFAULT_S3_ENDPOINT.to_string()),
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
        };

        let google_photos = match (
            var("GOOGLE_CLIENT_ID"),
            var("GOOGLE_CLIENT_SECRET"),
            var("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(GooglePhotosConfig {
                client_id,
                client_secret,
                redirect_uri,
                api_base: var("GOOGLE_PHOTOS_API_BASE")
                    .unwrap_or_else(|| GOOGLE_PHOTOS_API_BASE.to_string()),
                auth_url: var("GOOGLE_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
                token_url: var("GOOGLE_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            base,
            storage_backend,
            s3,
            google_photos,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if self.base.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_CONTENT_TYPES must not be empty"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3.bucket.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "BUCKET_NAME must be set when using S3 storage backend"
                    ));
                }
                if self.s3.access_key_id.is_some() != self.s3.secret_access_key.is_some() {
                    return Err(anyhow::anyhow!(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
                    ));
                }
            }
            StorageBackend::GooglePhotos => {
                if self.google_photos.is_none() {
                    return Err(anyhow::anyhow!(
                        "GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI must be set when using Google Photos storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
