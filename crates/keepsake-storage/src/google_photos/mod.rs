//! Google Photos storage backend
//!
//! Photos are stored in the Google Photos library of whoever completed the OAuth consent
//! flow. A session moves through these states:
//!
//! - **Unauthenticated**: no session id, or an id the store does not know
//! - **AuthorizationRequested**: a consent URL was issued and its CSRF state is pending
//! - **Authenticated**: the callback exchanged the code; the session id maps to a token set
//! - **Expired**: the access token lapsed; it is refreshed once, otherwise the session is
//!   dropped and the caller must authorize again
//!
//! Every operation other than the consent flow requires an authenticated session and fails
//! before contacting the provider when there is none.

mod client;
pub mod models;
mod session;

pub use client::GooglePhotosClient;
pub use models::{Album, MediaItem};
pub use session::{AuthSession, SessionStore};

use crate::traits::{PhotoStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use keepsake_core::constants::DEFAULT_GOOGLE_EVENT_DESCRIPTION;
use keepsake_core::models::{PhotoUpload, StoredPhoto};
use keepsake_core::GooglePhotosConfig;
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, RefreshToken,
    Scope, TokenResponse, TokenUrl,
};
use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/photoslibrary.appendonly",
    "https://www.googleapis.com/auth/photoslibrary.readonly.appcreateddata",
    "https://www.googleapis.com/auth/photoslibrary.sharing",
];

const SESSION_REQUIRED: &str = "Google Photos authorization required";
const SESSION_UNKNOWN: &str = "Google Photos session not found";
const SESSION_EXPIRED: &str = "Google Photos session expired; re-authorize";

/// Consent URL issued to start the OAuth flow.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub auth_url: String,
    /// CSRF state echoed back to the callback
    pub state: String,
}

pub struct GooglePhotosStorage {
    oauth: BasicClient,
    client: GooglePhotosClient,
    sessions: SessionStore,
}

impl GooglePhotosStorage {
    pub fn new(config: &GooglePhotosConfig) -> StorageResult<Self> {
        let oauth = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(config.auth_url.clone())
                .map_err(|e| StorageError::ConfigError(format!("Invalid auth URL: {}", e)))?,
            Some(
                TokenUrl::new(config.token_url.clone())
                    .map_err(|e| StorageError::ConfigError(format!("Invalid token URL: {}", e)))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(config.redirect_uri.clone())
                .map_err(|e| StorageError::ConfigError(format!("Invalid redirect URL: {}", e)))?,
        );

        Ok(Self {
            oauth,
            client: GooglePhotosClient::new(config.api_base.clone()),
            sessions: SessionStore::new(),
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Build the consent URL and remember its CSRF state.
    pub async fn request_authorization(&self) -> AuthorizationRequest {
        let mut request = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent");
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (url, state) = request.url();

        self.sessions
            .record_pending(state.secret().clone(), Utc::now())
            .await;

        AuthorizationRequest {
            auth_url: url.to_string(),
            state: state.secret().clone(),
        }
    }

    /// Exchange the one-time code for tokens and open a session. Returns the session id.
    ///
    /// When `state` is present it must match a pending authorization. A callback without
    /// `state` skips that check, so the pending-state lookup is advisory and does not on its
    /// own protect the callback against CSRF.
    pub async fn complete_authorization(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> StorageResult<String> {
        if let Some(state) = state {
            if !self.sessions.take_pending(state, Utc::now()).await {
                return Err(StorageError::InvalidState(
                    "unknown or expired authorization state".to_string(),
                ));
            }
        }

        let start = std::time::Instant::now();
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Google OAuth code exchange failed"
                );
                StorageError::Provider(format!("token exchange failed: {}", e))
            })?;

        let now = Utc::now();
        let session_id = self
            .sessions
            .create(AuthSession {
                access_token: token.access_token().secret().clone(),
                refresh_token: token.refresh_token().map(|t| t.secret().clone()),
                expires_at: expires_at(&token, now),
                created_at: now,
            })
            .await;

        tracing::info!(
            session_id = %session_id,
            has_refresh_token = token.refresh_token().is_some(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Google Photos session created"
        );

        Ok(session_id)
    }

    /// Resolve a usable access token for a session, refreshing an expired one once.
    async fn access_token(&self, session: Option<&str>) -> StorageResult<String> {
        let session_id = session
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StorageError::Unauthorized(SESSION_REQUIRED.to_string()))?;

        let current = self
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| StorageError::Unauthorized(SESSION_UNKNOWN.to_string()))?;

        let now = Utc::now();
        if !current.is_expired(now) {
            return Ok(current.access_token);
        }

        let Some(refresh_token) = current.refresh_token.clone() else {
            self.sessions.remove(session_id).await;
            tracing::warn!(
                session_id = %session_id,
                "Google Photos session expired without refresh token"
            );
            return Err(StorageError::SessionExpired(SESSION_EXPIRED.to_string()));
        };

        match self
            .oauth
            .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
            .request_async(async_http_client)
            .await
        {
            Ok(token) => {
                let refreshed = AuthSession {
                    access_token: token.access_token().secret().clone(),
                    refresh_token: token
                        .refresh_token()
                        .map(|t| t.secret().clone())
                        .or(Some(refresh_token)),
                    expires_at: expires_at(&token, now),
                    created_at: current.created_at,
                };
                let access_token = refreshed.access_token.clone();
                if !self.sessions.update(session_id, refreshed).await {
                    return Err(StorageError::Unauthorized(SESSION_UNKNOWN.to_string()));
                }
                tracing::info!(session_id = %session_id, "Google Photos session refreshed");
                Ok(access_token)
            }
            Err(e) => {
                self.sessions.remove(session_id).await;
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Google Photos token refresh failed"
                );
                Err(StorageError::SessionExpired(SESSION_EXPIRED.to_string()))
            }
        }
    }

    pub async fn list_albums(&self, session: Option<&str>) -> StorageResult<Vec<Album>> {
        let token = self.access_token(session).await?;
        self.client.list_albums(&token).await
    }

    pub async fn create_album(&self, session: Option<&str>, title: &str) -> StorageResult<Album> {
        let token = self.access_token(session).await?;
        let album = self.client.create_album(&token, title).await?;
        tracing::info!(album_id = %album.id, title = %album.title, "Google Photos album created");
        Ok(album)
    }

    pub async fn media_item(&self, session: Option<&str>, id: &str) -> StorageResult<MediaItem> {
        let token = self.access_token(session).await?;
        self.client.get_media_item(&token, id).await
    }
}

fn expires_at(token: &BasicTokenResponse, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    token
        .expires_in()
        .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
        .map(|ttl| now + ttl)
}

#[async_trait]
impl PhotoStorage for GooglePhotosStorage {
    async fn store(
        &self,
        session: Option<&str>,
        upload: PhotoUpload,
    ) -> StorageResult<StoredPhoto> {
        let token = self.access_token(session).await?;
        let size = upload.size() as u64;
        let start = std::time::Instant::now();

        let upload_token = self
            .client
            .upload_bytes(
                &token,
                Bytes::from(upload.data),
                &upload.content_type,
                &upload.original_filename,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    filename = %upload.original_filename,
                    size_bytes = size,
                    "Google Photos byte upload failed"
                );
                e
            })?;

        // The uploaded bytes are orphaned on the provider side if this call fails.
        let item = self
            .client
            .create_media_item(
                &token,
                &upload_token,
                &upload.original_filename,
                upload.metadata.object_description(),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    filename = %upload.original_filename,
                    "Google Photos media item creation failed"
                );
                e
            })?;

        tracing::info!(
            media_item_id = %item.id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Google Photos upload successful"
        );

        let media_item = serde_json::to_value(&item)
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        Ok(StoredPhoto {
            url: item.url().unwrap_or_default().to_string(),
            id: item.id,
            filename: upload.original_filename,
            upload_time: upload.uploaded_at,
            media_item: Some(media_item),
        })
    }

    async fn photo_url(
        &self,
        session: Option<&str>,
        photo_id: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        let item = self.media_item(session, photo_id).await?;
        item.url()
            .map(str::to_string)
            .ok_or_else(|| StorageError::NotFound(photo_id.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::GooglePhotos
    }

    fn default_event_description(&self) -> &'static str {
        DEFAULT_GOOGLE_EVENT_DESCRIPTION
    }
}
