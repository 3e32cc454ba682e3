//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Storage
//! failures go through [`storage_error`] so each operation reports its own generic summary
//! ("Failed to upload photo", "Failed to get photo") while the provider detail is only logged.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keepsake_core::{AppError, ErrorMetadata, LogLevel};
use keepsake_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Authorize with Google Photos via /auth/google")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from keepsake-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on
/// deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

pub(crate) fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .or_else(|_| std::env::var("NODE_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production; elsewhere only for non-sensitive errors.
        let (details, error_type) = if is_production || app_error.is_sensitive() {
            (None, None)
        } else {
            (
                Some(app_error.detailed_message()),
                Some(app_error.error_type().to_string()),
            )
        };

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            details,
            error_type,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        });

        (status, body).into_response()
    }
}

/// Translate a storage failure, using `summary` as the client message for provider errors.
pub fn storage_error(summary: &'static str) -> impl Fn(StorageError) -> HttpAppError {
    move |err| HttpAppError(to_app_error(err, summary))
}

fn to_app_error(err: StorageError, summary: &'static str) -> AppError {
    match err {
        StorageError::NotFound(msg) => AppError::NotFound(msg),
        StorageError::InvalidKey(msg) => {
            AppError::InvalidInput(format!("Invalid photo id: {}", msg))
        }
        StorageError::InvalidState(msg) => AppError::InvalidInput(msg),
        StorageError::Unauthorized(msg) => AppError::Unauthorized(msg),
        StorageError::SessionExpired(msg) => AppError::SessionExpired(msg),
        StorageError::Unsupported(backend) => AppError::InvalidInput(format!(
            "Operation not supported by the {} backend",
            backend
        )),
        StorageError::ConfigError(msg) => AppError::Internal(msg),
        StorageError::UploadFailed(detail)
        | StorageError::DownloadFailed(detail)
        | StorageError::Provider(detail)
        | StorageError::BackendError(detail) => AppError::provider(summary, detail),
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(to_app_error(err, "Storage provider error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_storage::StorageBackend;

    #[test]
    fn test_from_storage_error_not_found() {
        let HttpAppError(app_err) = StorageError::NotFound("m1".to_string()).into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "m1"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_upload_failure_uses_operation_summary() {
        let HttpAppError(app_err) =
            storage_error("Failed to upload photo")(StorageError::UploadFailed("503".to_string()));
        assert_eq!(app_err.client_message(), "Failed to upload photo");
        assert_eq!(app_err.http_status_code(), 500);
        assert!(app_err.to_string().contains("503"));
    }

    #[test]
    fn test_session_errors_are_unauthorized() {
        for err in [
            StorageError::Unauthorized("Google Photos session not found".to_string()),
            StorageError::SessionExpired("Google Photos session expired; re-authorize".to_string()),
        ] {
            let HttpAppError(app_err) = err.into();
            assert_eq!(app_err.http_status_code(), 401);
        }

        let expired = StorageError::SessionExpired("re-authorize".to_string());
        let HttpAppError(app_err) = expired.into();
        assert_eq!(app_err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_invalid_state_and_unsupported_are_client_errors() {
        let HttpAppError(app_err) = StorageError::InvalidState("forged".to_string()).into();
        assert_eq!(app_err.http_status_code(), 400);

        let HttpAppError(app_err) = StorageError::Unsupported(StorageBackend::GooglePhotos).into();
        assert_eq!(app_err.http_status_code(), 400);
        assert!(app_err.client_message().contains("google-photos"));
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "No file provided".to_string(),
            details: None,
            error_type: None,
            code: "MISSING_FILE".to_string(),
            recoverable: false,
            suggested_action: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "No file provided");
        assert_eq!(json["code"], "MISSING_FILE");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("details").is_none());
    }
}
