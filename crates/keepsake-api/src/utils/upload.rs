//! Common utilities for the photo upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use keepsake_core::AppError;

use crate::constants::PHOTO_FIELD;

/// Raw contents of the upload form before defaults are applied.
#[derive(Debug, Default)]
pub struct PhotoForm {
    pub data: Option<Vec<u8>>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<String>,
    /// Google Photos session id
    pub user_id: Option<String>,
}

fn multipart_error(e: MultipartError, what: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the upload limit".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read {}: {}", what, e.body_text()))
    }
}

/// Read the upload form. Only one field named "photo" is accepted; unknown fields are skipped.
pub async fn extract_photo_form(mut multipart: Multipart) -> Result<PhotoForm, AppError> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            PHOTO_FIELD => {
                if form.data.is_some() {
                    return Err(AppError::InvalidInput(format!(
                        "Multiple file fields are not allowed; send exactly one field named '{}'",
                        PHOTO_FIELD
                    )));
                }
                form.filename = field.file_name().map(|s: &str| s.to_string());
                form.content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "file data"))?;
                form.data = Some(data.to_vec());
            }
            "title" | "description" | "year" | "userId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "form field"))?;
                let value = Some(value).filter(|v| !v.trim().is_empty());
                match field_name.as_str() {
                    "title" => form.title = value,
                    "description" => form.description = value,
                    "year" => form.year = value,
                    _ => form.user_id = value,
                }
            }
            _ => {
                tracing::debug!(field = %field_name, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type: it must be an image and on the allowlist.
/// Returns the normalized MIME type.
pub fn validate_content_type(
    content_type: &str,
    allowed_types: &[String],
) -> Result<String, AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !normalized.starts_with("image/") {
        return Err(AppError::InvalidInput(format!(
            "Only image uploads are accepted, got '{}'",
            normalized
        )));
    }
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(normalized)
}

/// Reduce a client-supplied filename to its last path component with safe characters only.
/// Names made only of dots or separators become "photo".
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.' || c == '_') {
        return "photo".to_string();
    }

    sanitized.to_string()
}
