//! Google OAuth consent flow.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use keepsake_core::AppError;
use keepsake_storage::google_photos::AuthorizationRequest;
use keepsake_storage::GooglePhotosStorage;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{storage_error, ErrorResponse, HttpAppError};
use crate::state::StorageState;

pub(crate) fn google_photos(storage: &StorageState) -> Result<Arc<GooglePhotosStorage>, AppError> {
    storage
        .google_photos
        .clone()
        .ok_or_else(|| AppError::NotFound("Google Photos backend is not enabled".to_string()))
}

/// Redirect the browser to the Google consent screen
#[utoipa::path(
    get,
    path = "/auth/google",
    tag = "google-photos",
    responses(
        (status = 303, description = "Redirect to Google consent screen"),
        (status = 404, description = "Google Photos backend not enabled", body = ErrorResponse)
    )
)]
pub async fn authorize(State(storage): State<StorageState>) -> Result<Redirect, HttpAppError> {
    let request = google_photos(&storage)?.request_authorization().await;
    Ok(Redirect::to(&request.auth_url))
}

/// Consent URL as JSON, for clients that open it themselves
#[utoipa::path(
    get,
    path = "/auth/google/url",
    tag = "google-photos",
    responses(
        (status = 200, description = "Consent URL and its CSRF state", body = AuthorizationRequest),
        (status = 404, description = "Google Photos backend not enabled", body = ErrorResponse)
    )
)]
pub async fn authorization_url(
    State(storage): State<StorageState>,
) -> Result<Json<AuthorizationRequest>, HttpAppError> {
    Ok(Json(google_photos(&storage)?.request_authorization().await))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Google when the user declines consent
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub success: bool,
    /// Session id to send as `userId` on later requests
    pub user_id: String,
    pub message: String,
}

/// Exchange the authorization code for tokens and open a session
#[utoipa::path(
    get,
    path = "/auth/google/callback",
    tag = "google-photos",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Session created", body = CallbackResponse),
        (status = 400, description = "Missing code, declined consent, or unknown state", body = ErrorResponse),
        (status = 500, description = "Token exchange failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(storage, query), fields(operation = "google_oauth_callback"))]
pub async fn callback(
    State(storage): State<StorageState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<CallbackResponse>, HttpAppError> {
    let google = google_photos(&storage)?;

    if let Some(error) = query.error {
        return Err(
            AppError::InvalidInput(format!("Authorization was not granted: {}", error)).into(),
        );
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing authorization code".to_string()))?;

    let user_id = google
        .complete_authorization(&code, query.state.as_deref())
        .await
        .map_err(storage_error("Failed to authenticate with Google Photos"))?;

    Ok(Json(CallbackResponse {
        success: true,
        user_id,
        message: "Successfully authenticated with Google Photos".to_string(),
    }))
}
